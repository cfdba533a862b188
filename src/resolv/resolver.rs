//! The resolver handle and the dispatcher task behind it.

use super::conf::ResolvConf;
use super::config::Config;
use super::error::{Error, Result};
use super::pending::{Callback, Pending, PendingRequests};
use super::score::Scores;
use crate::base::{Message, Name, Record, Rtype};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

//------------ Resolver ------------------------------------------------------

/// An asynchronous stub resolver.
///
/// The resolver sends queries over UDP to the name servers of its
/// [`Config`]. If a server doesn’t answer within the timeout, the query is
/// sent again to the next server until the configured number of attempts is
/// used up. Servers are tried in the order of their reliability score, see
/// [`scores`](Self::scores).
///
/// All the actual work happens in a dispatcher task spawned onto the Tokio
/// runtime when the resolver is created. Values of this type are handles to
/// that task. They can be cloned cheaply and shared freely. Once all
/// handles are dropped, the dispatcher finishes the queries still pending
/// and then terminates.
#[derive(Clone, Debug)]
pub struct Resolver {
    commands: mpsc::UnboundedSender<Command>,
}

/// # Creation
///
impl Resolver {
    /// Creates a resolver using the given configuration.
    ///
    /// Binds a UDP socket to an ephemeral port of the unspecified address.
    /// If the first server has an IPv6 address, an IPv6 socket is used.
    ///
    /// This function must be called from within a Tokio runtime.
    pub async fn new(config: Config) -> io::Result<Self> {
        let bind: SocketAddr = match config.servers().first() {
            Some(SocketAddr::V6(_)) => (Ipv6Addr::UNSPECIFIED, 0).into(),
            _ => (Ipv4Addr::UNSPECIFIED, 0).into(),
        };
        let sock = UdpSocket::bind(bind).await?;
        debug!(local = %sock.local_addr()?, "resolver socket bound");
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Dispatcher::new(config, sock, rx).run());
        Ok(Resolver { commands: tx })
    }

    /// Creates a resolver using the system’s configuration.
    ///
    /// See [`ResolvConf::system_default`] for how the configuration is
    /// obtained.
    pub async fn system() -> io::Result<Self> {
        Self::new(Config::from_conf(&ResolvConf::system_default())).await
    }
}

/// # Queries
///
impl Resolver {
    /// Starts a query and delivers its outcome to `callback`.
    ///
    /// If `qtype` is `None`, the record type is derived from `qname`: a
    /// dotted IPv4 address is looked up via PTR, anything else via A.
    ///
    /// If an explicit type other than ANY is given and `filter` is `true`,
    /// only answers of that type are delivered. Otherwise, the complete
    /// answer section is.
    ///
    /// The method never blocks. The callback is run by the dispatcher task
    /// and thus shouldn’t block either. If nothing answered, the callback
    /// receives [`Error::Exhausted`].
    pub fn resolve_with<F>(
        &self,
        qname: impl Into<Name>,
        qtype: Option<Rtype>,
        filter: bool,
        callback: F,
    ) where
        F: FnOnce(Result<Vec<Record>>) + Send + 'static,
    {
        let command = Command::Query {
            qname: qname.into(),
            qtype,
            filter,
            callback: Box::new(callback),
        };
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command)
        {
            if let Command::Query { callback, .. } = command {
                callback(Err(Error::Shutdown))
            }
        }
    }

    /// Resolves a query and returns the answers.
    ///
    /// This is the awaitable version of [`resolve_with`](Self::resolve_with).
    pub async fn resolve(
        &self,
        qname: impl Into<Name>,
        qtype: Option<Rtype>,
        filter: bool,
    ) -> Result<Vec<Record>> {
        let (tx, rx) = oneshot::channel();
        self.resolve_with(qname, qtype, filter, move |res| {
            let _ = tx.send(res);
        });
        rx.await.unwrap_or(Err(Error::Shutdown))
    }

    /// Returns the current score of every server in configuration order.
    pub async fn scores(&self) -> Result<Vec<(SocketAddr, i64)>> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(Command::Scores(tx))
            .map_err(|_| Error::Shutdown)?;
        rx.await.map_err(|_| Error::Shutdown)
    }
}

/// # Lookups
///
impl Resolver {
    /// Looks up the A records of a name.
    pub async fn a_for(&self, name: impl Into<Name>) -> Result<Vec<Record>> {
        self.resolve(name, Some(Rtype::A), true).await
    }

    /// Looks up the name servers of a zone.
    ///
    /// A dotted IPv4 address is taken to mean its /24 network. For instance,
    /// `"192.0.2.7"` results in a query for the NS records of
    /// `2.0.192.in-addr.arpa.`. Any other name is queried as is.
    pub async fn ns_for(&self, name: impl Into<Name>) -> Result<Vec<Record>> {
        let name = name.into();
        let zone = match name.as_ipv4() {
            Some(addr) => reverse_zone(addr),
            None => name,
        };
        self.resolve(zone, Some(Rtype::NS), true).await
    }

    /// Looks up the mail exchangers of a name.
    pub async fn mx_for(&self, name: impl Into<Name>) -> Result<Vec<Record>> {
        self.resolve(name, Some(Rtype::MX), true).await
    }

    /// Looks up the names of an IPv4 address.
    pub async fn ptr_for(&self, addr: Ipv4Addr) -> Result<Vec<Record>> {
        self.resolve(Name::reverse_ipv4(addr), Some(Rtype::PTR), true)
            .await
    }

    /// Looks up the start of authority of a zone.
    pub async fn soa_for(&self, name: impl Into<Name>) -> Result<Vec<Record>> {
        self.resolve(name, Some(Rtype::SOA), true).await
    }

    /// Looks up the same record type for a number of names concurrently.
    pub async fn bulk_query<I, N>(
        &self,
        qtype: Rtype,
        names: I,
    ) -> HashMap<Name, Result<Vec<Record>>>
    where
        I: IntoIterator<Item = N>,
        N: Into<Name>,
    {
        let names: Vec<Name> = names.into_iter().map(Into::into).collect();
        let results = join_all(
            names
                .iter()
                .map(|name| self.resolve(name.clone(), Some(qtype), true)),
        )
        .await;
        names.into_iter().zip(results).collect()
    }

    /// Looks up the first name of a number of addresses concurrently.
    ///
    /// Addresses without a usable answer map to `None`.
    pub async fn reverse_addresses<I>(
        &self,
        addrs: I,
    ) -> HashMap<Ipv4Addr, Option<Name>>
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        let addrs: Vec<Ipv4Addr> = addrs.into_iter().collect();
        let results =
            join_all(addrs.iter().map(|addr| self.ptr_for(*addr))).await;
        addrs
            .into_iter()
            .zip(results)
            .map(|(addr, res)| {
                let name = res.ok().and_then(|answers| {
                    answers
                        .first()
                        .and_then(|record| record.data().as_name().cloned())
                });
                (addr, name)
            })
            .collect()
    }
}

/// Returns the reverse zone for the /24 network of an address.
fn reverse_zone(addr: Ipv4Addr) -> Name {
    let [a, b, c, _] = addr.octets();
    Name::new(&format!("{c}.{b}.{a}.in-addr.arpa."))
}

//------------ Command -------------------------------------------------------

/// A request from a resolver handle to the dispatcher.
enum Command {
    /// Resolve a query.
    Query {
        qname: Name,
        qtype: Option<Rtype>,
        filter: bool,
        callback: Callback,
    },

    /// Report the current server scores.
    Scores(oneshot::Sender<Vec<(SocketAddr, i64)>>),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Command::Query {
                ref qname,
                qtype,
                filter,
                ..
            } => f
                .debug_struct("Query")
                .field("qname", qname)
                .field("qtype", &qtype)
                .field("filter", &filter)
                .finish(),
            Command::Scores(_) => f.write_str("Scores"),
        }
    }
}

//------------ Event ---------------------------------------------------------

/// Something the dispatcher has to react to.
enum Event {
    Command(Option<Command>),
    Recv(io::Result<(usize, SocketAddr)>),
    Sweep,
    Decay,
}

//------------ Dispatcher ----------------------------------------------------

/// The task owning the socket and all state of a resolver.
struct Dispatcher {
    config: Config,
    sock: UdpSocket,
    commands: mpsc::UnboundedReceiver<Command>,
    pending: PendingRequests,
    scores: Scores,

    /// The message ID for the next query.
    next_id: u16,
}

/// Distinguishes the sequence seeds of resolvers created in quick
/// succession.
static INSTANCE: AtomicU16 = AtomicU16::new(0);

impl Dispatcher {
    fn new(
        config: Config,
        sock: UdpSocket,
        commands: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        let scores = Scores::new(config.servers());
        Dispatcher {
            config,
            sock,
            commands,
            pending: PendingRequests::new(),
            scores,
            next_id: initial_id(),
        }
    }

    async fn run(mut self) {
        let start = Instant::now();
        let mut sweep = time::interval_at(
            start + self.config.sweep_interval(),
            self.config.sweep_interval(),
        );
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut decay = time::interval_at(
            start + self.config.decay_interval(),
            self.config.decay_interval(),
        );
        decay.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut buf = vec![0u8; self.config.recv_size()];
        let mut open = true;

        while open || !self.pending.is_empty() {
            let event = tokio::select! {
                command = self.commands.recv(), if open => {
                    Event::Command(command)
                }
                res = self.sock.recv_from(&mut buf) => Event::Recv(res),
                _ = sweep.tick() => Event::Sweep,
                _ = decay.tick() => Event::Decay,
            };
            match event {
                Event::Command(Some(command)) => {
                    self.handle_command(command).await
                }
                Event::Command(None) => {
                    debug!(
                        pending = self.pending.len(),
                        "all handles dropped, finishing pending queries"
                    );
                    open = false
                }
                Event::Recv(Ok((len, source))) => {
                    self.handle_response(&buf[..len], source)
                }
                Event::Recv(Err(err)) => {
                    warn!("receiving from resolver socket failed: {}", err)
                }
                Event::Sweep => self.sweep().await,
                Event::Decay => {
                    trace!("decaying server scores");
                    self.scores.decay()
                }
            }
        }
        debug!("resolver dispatcher terminated");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Query {
                qname,
                qtype,
                filter,
                callback,
            } => self.start_query(qname, qtype, filter, callback).await,
            Command::Scores(tx) => {
                let _ = tx.send(self.scores.snapshot());
            }
        }
    }

    /// Sends a new query to the best server.
    async fn start_query(
        &mut self,
        qname: Name,
        qtype: Option<Rtype>,
        filter: bool,
        callback: Callback,
    ) {
        let mut candidates = self.scores.candidates();
        let target = match candidates.pop() {
            Some(target) => target,
            None => return callback(Err(Error::NoServers)),
        };
        let id = match self.take_id() {
            Some(id) => id,
            None => {
                warn!("no free message ID, dropping query for {}", qname);
                return callback(Err(Error::Exhausted));
            }
        };

        let mut message = Message::question(qname, qtype);
        message.set_id(id);
        let bytes = match message.to_bytes() {
            Ok(bytes) => bytes,
            Err(err) => return callback(Err(err.into())),
        };

        if let Err(err) = self.sock.send_to(&bytes, target).await {
            debug!(id, server = %target, "sending query failed: {}", err);
            return callback(Err(Error::Send(err)));
        }
        let attempts_left = self.config.attempts() - 1;
        trace!(id, server = %target, attempts_left, "query sent");
        self.pending.push(
            id,
            Pending::new(
                bytes,
                qtype,
                filter,
                candidates,
                target,
                attempts_left,
                callback,
            ),
        );
    }

    /// Returns the next message ID not currently in use.
    fn take_id(&mut self) -> Option<u16> {
        for _ in 0..=u16::MAX {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            if !self.pending.contains(id) {
                return Some(id);
            }
        }
        None
    }

    /// Processes a datagram received on the socket.
    fn handle_response(&mut self, data: &[u8], source: SocketAddr) {
        if !self.scores.contains(&source) {
            debug!(server = %source, "dropping datagram from unknown source");
            return;
        }
        let message = match Message::from_octets(data) {
            Ok(message) => message,
            Err(err) => {
                debug!(server = %source, "dropping malformed response: {}", err);
                return;
            }
        };
        if !message.is_response() {
            debug!(server = %source, "dropping message without QR bit");
            return;
        }
        let id = message.id();
        let request = match self.pending.pop(id) {
            Some(request) => request,
            None => {
                trace!(id, server = %source, "dropping unexpected response");
                return;
            }
        };
        trace!(id, server = %source, rcode = %message.rcode(), "response received");
        self.scores.reward(&source);
        request.complete(message.into_answers());
    }

    /// Retries or fails all queries whose current attempt is over.
    async fn sweep(&mut self) {
        let timeout = self.config.timeout();
        for id in self.pending.expired(Instant::now(), timeout) {
            let request = match self.pending.get_mut(id) {
                Some(request) => request,
                None => continue,
            };
            self.scores.penalize(&request.target());
            match request.rotate(&self.scores) {
                Some(target) => {
                    let attempts_left = request.attempts_left();
                    let res = self.sock.send_to(request.bytes(), target).await;
                    if let Err(ref err) = res {
                        debug!(
                            id, server = %target, attempts_left,
                            "resending query failed: {}", err
                        );
                    } else {
                        trace!(id, server = %target, attempts_left, "query resent");
                    }
                    request.sent(Instant::now(), res.is_err());
                }
                None => {
                    if let Some(request) = self.pending.pop(id) {
                        debug!(id, server = %request.target(), "query exhausted");
                        request.fail(Error::Exhausted)
                    }
                }
            }
        }
    }
}

/// Returns the first message ID of a new resolver.
///
/// Mixes a random value, a per-process instance counter, and the current
/// time.
fn initial_id() -> u16 {
    let instance = INSTANCE.fetch_add(1, Ordering::Relaxed);
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|time| (time.as_micros() / 10) as u16)
        .unwrap_or(0);
    rand::random::<u16>() ^ instance ^ time
}

//============ Testing =======================================================
