//! Configuration of the resolver.

use super::conf::ResolvConf;
use std::cmp;
use std::net::SocketAddr;
use std::time::Duration;

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a config variable.
#[derive(Clone, Copy)]
struct DefMinMax<T> {
    /// The default value,
    def: T,

    /// The minimum value,
    min: T,

    /// The maximum value,
    max: T,
}

impl<T> DefMinMax<T> {
    /// Creates a new value.
    const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    /// Returns the default value.
    fn default(self) -> T {
        self.def
    }

    /// Trims the given value to fit into the minimum/maximum range.
    fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//------------ Configuration Constants ---------------------------------------

/// Configuration limits for the time to wait for a response.
const TIMEOUT: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(5),
    Duration::from_millis(10),
    Duration::from_secs(60),
);

/// Configuration limits for the number of times a query is sent.
const ATTEMPTS: DefMinMax<usize> = DefMinMax::new(2, 1, 20);

/// Configuration limits for the interval of the timeout sweep.
const SWEEP_INTERVAL: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(1),
    Duration::from_millis(1),
    Duration::from_secs(10),
);

/// Configuration limits for the interval at which server scores decay.
const DECAY_INTERVAL: DefMinMax<Duration> = DefMinMax::new(
    Duration::from_secs(30),
    Duration::from_millis(1),
    Duration::from_secs(3600),
);

/// Configuration limits for the size of the receive buffer.
///
/// The default of 1232 follows the 2020 DNS Flag Day.
const RECV_SIZE: DefMinMax<usize> = DefMinMax::new(1232, 512, 65535);

//------------ Config --------------------------------------------------------

/// Configuration for a [`Resolver`].
///
/// All values but the list of servers are limited to a sensible range.
/// Setting a value outside of it will quietly cap it.
///
/// [`Resolver`]: super::Resolver
#[derive(Clone, Debug)]
pub struct Config {
    /// The name servers to send queries to, in order of preference.
    servers: Vec<SocketAddr>,

    /// The time to wait for a response before trying again.
    timeout: Duration,

    /// The number of times a query is sent before giving up.
    attempts: usize,

    /// How often to check pending queries for timeouts.
    sweep_interval: Duration,

    /// How often to halve the server scores.
    decay_interval: Duration,

    /// The size of the buffer for receiving responses.
    recv_size: usize,
}

impl Config {
    /// Creates a new config with default values and no servers.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new config from a resolver configuration.
    ///
    /// Takes the servers, the timeout, and the number of attempts. Everything
    /// else keeps its default value.
    pub fn from_conf(conf: &ResolvConf) -> Self {
        let mut res = Self::new();
        for server in &conf.servers {
            res.add_server(*server);
        }
        res.set_timeout(conf.timeout);
        res.set_attempts(conf.attempts);
        res
    }

    /// Returns the name servers.
    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    /// Adds a name server unless it is already present.
    pub fn add_server(&mut self, addr: SocketAddr) {
        if !self.servers.contains(&addr) {
            self.servers.push(addr)
        }
    }

    /// Replaces the list of name servers.
    ///
    /// Duplicates are dropped. The first occurrence keeps its place.
    pub fn set_servers(&mut self, servers: impl IntoIterator<Item = SocketAddr>) {
        self.servers.clear();
        for server in servers {
            self.add_server(server)
        }
    }

    /// Returns the time to wait for a response.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the time to wait for a response.
    ///
    /// The value has to be between 10ms and 60 seconds. The default value is
    /// 5 seconds.
    pub fn set_timeout(&mut self, value: Duration) {
        self.timeout = TIMEOUT.limit(value)
    }

    /// Returns the number of times a query is sent before giving up.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Sets the number of times a query is sent before giving up.
    ///
    /// The value has to be between 1 and 20. The default value is 2.
    pub fn set_attempts(&mut self, value: usize) {
        self.attempts = ATTEMPTS.limit(value)
    }

    /// Returns the interval of the timeout sweep.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Sets the interval of the timeout sweep.
    ///
    /// A query is only noticed to have timed out on the next sweep after its
    /// timeout passed. The value has to be between 1ms and 10 seconds. The
    /// default value is 1 second.
    pub fn set_sweep_interval(&mut self, value: Duration) {
        self.sweep_interval = SWEEP_INTERVAL.limit(value)
    }

    /// Returns the interval at which server scores are halved.
    pub fn decay_interval(&self) -> Duration {
        self.decay_interval
    }

    /// Sets the interval at which server scores are halved.
    ///
    /// The value has to be between 1ms and one hour. The default value is
    /// 30 seconds.
    pub fn set_decay_interval(&mut self, value: Duration) {
        self.decay_interval = DECAY_INTERVAL.limit(value)
    }

    /// Returns the size of the receive buffer.
    pub fn recv_size(&self) -> usize {
        self.recv_size
    }

    /// Sets the size of the receive buffer.
    ///
    /// Longer responses are truncated and will likely fail to parse. The
    /// value has to be between 512 and 65535. The default value is 1232.
    pub fn set_recv_size(&mut self, value: usize) {
        self.recv_size = RECV_SIZE.limit(value)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            timeout: TIMEOUT.default(),
            attempts: ATTEMPTS.default(),
            sweep_interval: SWEEP_INTERVAL.default(),
            decay_interval: DECAY_INTERVAL.default(),
            recv_size: RECV_SIZE.default(),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert!(config.servers().is_empty());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.attempts(), 2);
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.decay_interval(), Duration::from_secs(30));
        assert_eq!(config.recv_size(), 1232);
    }

    #[test]
    fn limits() {
        let mut config = Config::new();
        config.set_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_millis(10));
        config.set_timeout(Duration::from_secs(3600));
        assert_eq!(config.timeout(), Duration::from_secs(60));
        config.set_attempts(0);
        assert_eq!(config.attempts(), 1);
        config.set_attempts(100);
        assert_eq!(config.attempts(), 20);
        config.set_sweep_interval(Duration::from_secs(11));
        assert_eq!(config.sweep_interval(), Duration::from_secs(10));
        config.set_recv_size(0);
        assert_eq!(config.recv_size(), 512);
    }

    #[test]
    fn servers_are_unique() {
        let a: SocketAddr = "192.0.2.1:53".parse().unwrap();
        let b: SocketAddr = "192.0.2.2:53".parse().unwrap();
        let mut config = Config::new();
        config.set_servers([a, b, a]);
        assert_eq!(config.servers(), &[a, b]);
        config.add_server(b);
        assert_eq!(config.servers().len(), 2);
    }

    #[test]
    fn from_conf() {
        let mut conf = ResolvConf::new();
        conf.servers.push("192.0.2.1:53".parse().unwrap());
        conf.timeout = Duration::from_secs(120);
        conf.attempts = 3;
        let config = Config::from_conf(&conf);
        assert_eq!(config.servers().len(), 1);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.attempts(), 3);
    }
}
