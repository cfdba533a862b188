//! Reliability scores of name servers.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::net::SocketAddr;

//------------ Scores --------------------------------------------------------

/// The reliability scores of a set of name servers.
///
/// A server gains a point for every answer it gives and loses one for
/// every query it lets time out or that could not be sent to it. All scores
/// are halved periodically so that old history fades away.
///
/// Scores only decide the order in which servers are tried. A server is
/// never dropped, no matter how bad its score.
#[derive(Clone, Debug, Default)]
pub struct Scores {
    servers: Vec<SocketAddr>,
    scores: HashMap<SocketAddr, i64>,
}

impl Scores {
    /// Creates scores for the given servers, all starting at zero.
    pub fn new(servers: &[SocketAddr]) -> Self {
        Scores {
            servers: servers.to_vec(),
            scores: servers.iter().map(|addr| (*addr, 0)).collect(),
        }
    }

    /// Returns whether `addr` is one of the servers.
    pub fn contains(&self, addr: &SocketAddr) -> bool {
        self.scores.contains_key(addr)
    }

    /// Adds a point to the server.
    pub fn reward(&mut self, addr: &SocketAddr) {
        if let Some(score) = self.scores.get_mut(addr) {
            *score = score.saturating_add(1)
        }
    }

    /// Takes a point from the server.
    pub fn penalize(&mut self, addr: &SocketAddr) {
        if let Some(score) = self.scores.get_mut(addr) {
            *score = score.saturating_sub(1)
        }
    }

    /// Halves all scores, rounding towards zero.
    pub fn decay(&mut self) {
        for score in self.scores.values_mut() {
            *score /= 2
        }
    }

    /// Returns the servers ordered for popping from the end.
    ///
    /// The best server is last. Between servers with the same score, the
    /// one configured earlier wins.
    pub fn candidates(&self) -> Vec<SocketAddr> {
        let mut res: Vec<_> = self.servers.iter().enumerate().collect();
        res.sort_by_key(|(idx, addr)| {
            (self.scores.get(*addr).copied().unwrap_or(0), Reverse(*idx))
        });
        res.into_iter().map(|(_, addr)| *addr).collect()
    }

    /// Returns all servers and their scores in configuration order.
    pub fn snapshot(&self) -> Vec<(SocketAddr, i64)> {
        self.servers
            .iter()
            .map(|addr| (*addr, self.scores.get(addr).copied().unwrap_or(0)))
            .collect()
    }
}

//============ Testing =======================================================
