//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use stubdns::base::{Class, Message, Name, Record, Rtype};
use stubdns::rdata::{RecordData, A};
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the resolver and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable trace level logging of the resolver only:
///   RUST_LOG=stubdns=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

/// Binds a name server that never answers.
///
/// The socket is returned so the test can count what arrived.
pub fn silent_server() -> (SocketAddr, std::net::UdpSocket) {
    let sock = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    (sock.local_addr().unwrap(), sock)
}

/// Returns the number of datagrams waiting on a silent server.
pub fn received(sock: &std::net::UdpSocket) -> usize {
    sock.set_nonblocking(true).unwrap();
    let mut buf = [0u8; 512];
    let mut count = 0;
    while sock.recv_from(&mut buf).is_ok() {
        count += 1
    }
    count
}

/// Spawns a name server that answers every query.
///
/// PTR queries get a single PTR record for `host.example.`. Everything else
/// gets an A record for 192.0.2.1 plus an NS record for `ns.example.`.
pub async fn answering_server() -> SocketAddr {
    let sock = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = sock.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 512];
        loop {
            let (len, peer) = match sock.recv_from(&mut buf).await {
                Ok(res) => res,
                Err(_) => return,
            };
            let query = match Message::from_octets(&buf[..len]) {
                Ok(query) => query,
                Err(_) => continue,
            };
            let _ = sock.send_to(&answer(&query), peer).await;
        }
    });
    addr
}

fn answer(query: &Message) -> Vec<u8> {
    let mut response = Message::new();
    response.set_id(query.id());
    response.header_mut().set_qr(true);
    response.header_mut().set_ra(true);
    if let Some(question) = query.first_question() {
        let qname = question.qname().clone();
        if question.qtype() == Rtype::PTR {
            response.push_answer(Record::new(
                qname,
                Class::IN,
                300,
                RecordData::Ptr(Name::new("host.example")),
            ));
        } else {
            response.push_answer(Record::new(
                qname.clone(),
                Class::IN,
                300,
                A::new(Ipv4Addr::new(192, 0, 2, 1)),
            ));
            response.push_answer(Record::new(
                qname,
                Class::IN,
                300,
                RecordData::Ns(Name::new("ns.example")),
            ));
        }
        response.push_question(question.clone());
    }
    response.to_bytes().unwrap().to_vec()
}
