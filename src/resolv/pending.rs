//! A collection of pending requests.

use super::error::Error;
use super::score::Scores;
use crate::base::{Record, Rtype};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;

//------------ Callback ------------------------------------------------------

/// The function receiving the outcome of a query.
pub type Callback = Box<dyn FnOnce(Result<Vec<Record>, Error>) + Send>;

//------------ Pending -------------------------------------------------------

/// A query that has been sent but not yet been answered.
pub struct Pending {
    /// The wire format of the query, sent again on every attempt.
    bytes: Bytes,

    /// The explicitly requested record type.
    qtype: Option<Rtype>,

    /// Whether to only pass on answers of the requested type.
    filter: bool,

    /// The servers still to try, the next one last.
    candidates: Vec<SocketAddr>,

    /// The server the query was last sent to.
    target: SocketAddr,

    /// How many more times the query may be sent.
    attempts_left: usize,

    /// When the query was last sent.
    sent_at: Instant,

    /// Whether the last send failed.
    send_failed: bool,

    /// Where to deliver the result.
    callback: Callback,
}

impl Pending {
    /// Creates a new pending query.
    ///
    /// The query is considered sent to `target` just now.
    pub fn new(
        bytes: Bytes,
        qtype: Option<Rtype>,
        filter: bool,
        candidates: Vec<SocketAddr>,
        target: SocketAddr,
        attempts_left: usize,
        callback: Callback,
    ) -> Self {
        Pending {
            bytes,
            qtype,
            filter,
            candidates,
            target,
            attempts_left,
            sent_at: Instant::now(),
            send_failed: false,
            callback,
        }
    }

    /// Returns the wire format of the query.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the server the query was last sent to.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Returns how many more times the query may be sent.
    pub fn attempts_left(&self) -> usize {
        self.attempts_left
    }

    /// Returns whether the current attempt is over.
    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        self.send_failed || now.saturating_duration_since(self.sent_at) >= timeout
    }

    /// Moves on to the next server and returns it.
    ///
    /// If all candidates have been used up, a fresh ordering is taken from
    /// `scores`. Returns `None` if there are no more attempts left.
    pub fn rotate(&mut self, scores: &Scores) -> Option<SocketAddr> {
        if self.attempts_left == 0 {
            return None;
        }
        if self.candidates.is_empty() {
            self.candidates = scores.candidates();
        }
        let target = self.candidates.pop()?;
        self.attempts_left -= 1;
        self.target = target;
        Some(target)
    }

    /// Records the outcome of sending the query.
    pub fn sent(&mut self, now: Instant, failed: bool) {
        self.sent_at = now;
        self.send_failed = failed;
    }

    /// Delivers the answers of a response.
    ///
    /// If an explicit type other than ANY was requested and filtering is
    /// enabled, only answers of that type are kept.
    pub fn complete(self, answers: Vec<Record>) {
        let answers = match self.qtype {
            Some(qtype) if self.filter && qtype != Rtype::ANY => answers
                .into_iter()
                .filter(|record| record.rtype() == qtype)
                .collect(),
            _ => answers,
        };
        (self.callback)(Ok(answers))
    }

    /// Delivers an error.
    pub fn fail(self, err: Error) {
        (self.callback)(Err(err))
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pending")
            .field("qtype", &self.qtype)
            .field("filter", &self.filter)
            .field("candidates", &self.candidates)
            .field("target", &self.target)
            .field("attempts_left", &self.attempts_left)
            .field("sent_at", &self.sent_at)
            .field("send_failed", &self.send_failed)
            .finish()
    }
}

//------------ PendingRequests -----------------------------------------------

/// A collection of pending requests keyed by message ID.
#[derive(Debug, Default)]
pub struct PendingRequests {
    requests: HashMap<u16, Pending>,
}

impl PendingRequests {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns whether there are no pending requests.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Returns the number of pending requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns whether a request with the given ID is pending.
    pub fn contains(&self, id: u16) -> bool {
        self.requests.contains_key(&id)
    }

    /// Adds a request.
    ///
    /// A request already pending under the same ID is returned.
    pub fn push(&mut self, id: u16, request: Pending) -> Option<Pending> {
        self.requests.insert(id, request)
    }

    /// Removes and returns the request with the given ID.
    pub fn pop(&mut self, id: u16) -> Option<Pending> {
        self.requests.remove(&id)
    }

    /// Returns the request with the given ID.
    pub fn get_mut(&mut self, id: u16) -> Option<&mut Pending> {
        self.requests.get_mut(&id)
    }

    /// Returns the IDs of all requests whose current attempt is over.
    pub fn expired(&self, now: Instant, timeout: Duration) -> Vec<u16> {
        self.requests
            .iter()
            .filter(|(_, request)| request.is_expired(now, timeout))
            .map(|(id, _)| *id)
            .collect()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::{Class, Name};
    use crate::rdata::rfc1035::A;
    use crate::rdata::RecordData;
    use std::net::Ipv4Addr;
    use std::sync::{Arc, Mutex};

    fn addr(n: u8) -> SocketAddr {
        SocketAddr::from(([192, 0, 2, n], 53))
    }

    fn collect() -> (Callback, Arc<Mutex<Option<Result<Vec<Record>, Error>>>>)
    {
        let slot = Arc::new(Mutex::new(None));
        let res = slot.clone();
        let callback: Callback = Box::new(move |result| {
            *slot.lock().unwrap() = Some(result);
        });
        (callback, res)
    }

    fn answers() -> Vec<Record> {
        vec![
            Record::new(
                "example.com",
                Class::IN,
                300,
                A::new(Ipv4Addr::new(192, 0, 2, 1)),
            ),
            Record::new(
                "example.com",
                Class::IN,
                300,
                RecordData::Ns(Name::new("ns.example")),
            ),
        ]
    }

    fn pending(qtype: Option<Rtype>, filter: bool, callback: Callback) -> Pending {
        Pending::new(
            Bytes::new(),
            qtype,
            filter,
            vec![addr(2)],
            addr(1),
            1,
            callback,
        )
    }

    #[test]
    fn filter_by_type() {
        let (callback, res) = collect();
        pending(Some(Rtype::A), true, callback).complete(answers());
        let res = res.lock().unwrap().take().unwrap().unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].rtype(), Rtype::A);
    }

    #[test]
    fn no_filter() {
        for (qtype, filter) in
            [(Some(Rtype::A), false), (Some(Rtype::ANY), true), (None, true)]
        {
            let (callback, res) = collect();
            pending(qtype, filter, callback).complete(answers());
            let res = res.lock().unwrap().take().unwrap().unwrap();
            assert_eq!(res.len(), 2);
        }
    }

    #[test]
    fn fail() {
        let (callback, res) = collect();
        pending(None, true, callback).fail(Error::Exhausted);
        assert!(matches!(
            res.lock().unwrap().take(),
            Some(Err(Error::Exhausted))
        ));
    }

    #[test]
    fn rotate() {
        let scores = Scores::new(&[addr(1), addr(2)]);
        let (callback, _res) = collect();
        let mut request = Pending::new(
            Bytes::new(),
            None,
            true,
            vec![addr(2)],
            addr(1),
            2,
            callback,
        );
        assert_eq!(request.rotate(&scores), Some(addr(2)));
        assert_eq!(request.target(), addr(2));
        assert_eq!(request.rotate(&scores), Some(addr(1)));
        assert_eq!(request.attempts_left(), 0);
        assert_eq!(request.rotate(&scores), None);
    }

    #[test]
    fn expiry() {
        let (callback, _res) = collect();
        let mut request = pending(None, true, callback);
        let now = Instant::now();
        let timeout = Duration::from_secs(5);
        request.sent(now, false);
        assert!(!request.is_expired(now, timeout));
        assert!(request.is_expired(now + timeout, timeout));
        request.sent(now, true);
        assert!(request.is_expired(now, timeout));

        let mut requests = PendingRequests::new();
        assert!(requests.push(7, request).is_none());
        assert_eq!(requests.expired(now, timeout), vec![7]);
        assert!(requests.get_mut(7).is_some());
        assert!(requests.pop(7).is_some());
        assert!(requests.is_empty());
    }
}
