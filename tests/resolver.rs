//! Tests of the resolver against fake name servers on the loopback
//! interface.

mod common;

use common::{answering_server, init_logging, received, silent_server};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use stubdns::base::{Name, Rtype};
use stubdns::resolv::{Config, Error, Resolver};
use tokio::sync::oneshot;
use tokio::time::Instant;

fn config(servers: &[SocketAddr]) -> Config {
    let mut config = Config::new();
    config.set_servers(servers.iter().copied());
    config
}

#[tokio::test]
async fn answers_are_filtered_by_type() {
    init_logging();
    let server = answering_server().await;
    let resolver = Resolver::new(config(&[server])).await.unwrap();

    let answers = resolver
        .resolve("example.com", Some(Rtype::A), true)
        .await
        .unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].rtype(), Rtype::A);
    assert_eq!(answers[0].owner().as_str(), "example.com.");
    assert_eq!(answers[0].data().to_string(), "192.0.2.1");

    let answers = resolver
        .resolve("example.com", Some(Rtype::A), false)
        .await
        .unwrap();
    assert_eq!(answers.len(), 2);

    let answers = resolver
        .resolve("example.com", Some(Rtype::ANY), true)
        .await
        .unwrap();
    assert_eq!(answers.len(), 2);

    let answers = resolver.resolve("example.com", None, true).await.unwrap();
    assert_eq!(answers.len(), 2);

    // A response without matching answers is not a failure.
    let answers = resolver.mx_for("example.com").await.unwrap();
    assert!(answers.is_empty());

    assert_eq!(resolver.scores().await.unwrap(), vec![(server, 5)]);
}

#[tokio::test]
async fn lookups() {
    init_logging();
    let server = answering_server().await;
    let resolver = Resolver::new(config(&[server])).await.unwrap();

    let answers = resolver.a_for("example.com").await.unwrap();
    assert_eq!(answers.len(), 1);

    let answers = resolver.ns_for("192.0.2.7").await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].owner().as_str(), "2.0.192.in-addr.arpa.");
    assert_eq!(answers[0].data().to_string(), "ns.example.");

    let answers = resolver.ns_for("example.com").await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].owner().as_str(), "example.com.");
    assert_eq!(answers[0].rtype(), Rtype::NS);

    let answers = resolver.ptr_for(Ipv4Addr::new(192, 0, 2, 7)).await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].owner().as_str(), "7.2.0.192.in-addr.arpa.");

    // A bare address is looked up as PTR.
    let answers = resolver.resolve("192.0.2.7", None, true).await.unwrap();
    assert_eq!(answers[0].rtype(), Rtype::PTR);

    let results = resolver
        .bulk_query(Rtype::A, ["a.example", "b.example"])
        .await;
    assert_eq!(results.len(), 2);
    for name in ["a.example.", "b.example."] {
        let answers = results[&Name::new(name)].as_ref().unwrap();
        assert_eq!(answers[0].owner().as_str(), name);
    }

    let addrs = [Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)];
    let names = resolver.reverse_addresses(addrs).await;
    assert_eq!(names.len(), 2);
    for addr in addrs {
        assert_eq!(names[&addr], Some(Name::new("host.example")));
    }
}

#[tokio::test(start_paused = true)]
async fn timeout_after_all_attempts() {
    init_logging();
    let (addr, sock) = silent_server();
    let timeout = Duration::from_secs(2);
    let sweep = Duration::from_millis(500);
    let mut config = config(&[addr]);
    config.set_timeout(timeout);
    config.set_sweep_interval(sweep);
    config.set_attempts(3);
    let resolver = Resolver::new(config).await.unwrap();

    let start = Instant::now();
    let res = resolver.a_for("example.com").await;
    let elapsed = start.elapsed();

    assert!(matches!(res, Err(Error::Exhausted)));
    assert!(elapsed >= timeout * 3, "{:?}", elapsed);
    assert!(elapsed <= (timeout + sweep) * 3, "{:?}", elapsed);
    assert_eq!(received(&sock), 3);
    assert_eq!(resolver.scores().await.unwrap(), vec![(addr, -3)]);
}

#[tokio::test]
async fn failover_to_next_server() {
    init_logging();
    let (silent, _sock) = silent_server();
    let server = answering_server().await;
    let mut config = config(&[silent, server]);
    config.set_timeout(Duration::from_millis(200));
    config.set_sweep_interval(Duration::from_millis(20));
    config.set_attempts(2);
    let resolver = Resolver::new(config).await.unwrap();

    // Both servers start out equal, so the first one is asked first.
    let answers = resolver.a_for("example.com").await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(
        resolver.scores().await.unwrap(),
        vec![(silent, -1), (server, 1)]
    );

    // Now the answering server is preferred.
    let answers = resolver.a_for("example.com").await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(
        resolver.scores().await.unwrap(),
        vec![(silent, -1), (server, 2)]
    );
}

#[tokio::test(start_paused = true)]
async fn single_attempt() {
    init_logging();
    let (addr, sock) = silent_server();
    let mut config = config(&[addr]);
    config.set_attempts(1);
    let resolver = Resolver::new(config).await.unwrap();
    assert!(matches!(
        resolver.a_for("example.com").await,
        Err(Error::Exhausted)
    ));
    assert_eq!(received(&sock), 1);
}

#[tokio::test]
async fn send_failure_completes_immediately() {
    init_logging();
    // Sending to the broadcast address without SO_BROADCAST is refused.
    let resolver = Resolver::new(config(&["255.255.255.255:53".parse().unwrap()]))
        .await
        .unwrap();
    assert!(matches!(
        resolver.a_for("example.com").await,
        Err(Error::Send(_))
    ));
}

#[tokio::test]
async fn no_servers() {
    init_logging();
    let resolver = Resolver::new(Config::new()).await.unwrap();
    let res = resolver.a_for("example.com").await;
    assert!(matches!(res, Err(Error::NoServers)));
}

#[tokio::test(start_paused = true)]
async fn pending_queries_survive_handles() {
    init_logging();
    let (addr, _sock) = silent_server();
    let resolver = Resolver::new(config(&[addr])).await.unwrap();
    let (tx, rx) = oneshot::channel();
    resolver.resolve_with("example.com", Some(Rtype::A), true, move |res| {
        let _ = tx.send(res);
    });
    drop(resolver);
    assert!(matches!(rx.await, Ok(Err(Error::Exhausted))));
}

#[tokio::test(start_paused = true)]
async fn scores_decay() {
    init_logging();
    let (addr, _sock) = silent_server();
    let mut config = config(&[addr]);
    config.set_timeout(Duration::from_millis(100));
    config.set_sweep_interval(Duration::from_millis(10));
    config.set_decay_interval(Duration::from_secs(10));
    let resolver = Resolver::new(config).await.unwrap();

    for _ in 0..2 {
        assert!(matches!(
            resolver.a_for("example.com").await,
            Err(Error::Exhausted)
        ));
    }
    assert_eq!(resolver.scores().await.unwrap(), vec![(addr, -4)]);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(resolver.scores().await.unwrap(), vec![(addr, -2)]);
}
