use crate::health::NtpStatusSnapshot;

use super::clockvar::ClockVar;
use super::peers::PeerTable;

impl NtpStatusSnapshot {
    /// Builds a snapshot from one `ntpq -p` and one `ntpq -c clockvar` output.
    ///
    /// Peer fields come from the system peer; without one they stay at their
    /// defaults, which scores as eight missed polls.
    pub fn from_ntpq(peers_raw: &str, clockvar_raw: &str) -> Self {
        let peers = PeerTable::parse(peers_raw);
        let clockvar = ClockVar::parse(clockvar_raw);
        Self::from_parts(&peers, &clockvar)
    }

    pub fn from_parts(peers: &PeerTable, clockvar: &ClockVar) -> Self {
        let mut snapshot = Self {
            driver_stratum: clockvar.stratum(),
            driver_ref_id: clockvar.refid().to_string(),
            poll: clockvar.poll(),
            no_reply: clockvar.noreply(),
            bad_format: clockvar.badformat(),
            timecode: clockvar.timecode().to_string(),
            ..Self::default()
        };

        if let Some(peer) = peers.system_peer() {
            snapshot.offset = peer.offset;
            snapshot.jitter = peer.jitter;
            snapshot.reach = peer.reach;
            snapshot.peer_stratum = peer.stratum;
            snapshot.peer_ref_id = peer.refid.clone();
        }

        snapshot
    }
}
