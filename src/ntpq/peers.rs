use serde::Serialize;

use super::error::NtpqError;

const PEER_COLUMNS: usize = 10;
const TALLY_CODES: &[char] = &[' ', '*', 'o', '+', '-', 'x', '.', '#'];

/// One row of `ntpq -p`.
///
/// Columns: `remote refid st t when poll reach delay offset jitter`,
/// preceded by a one-character tally code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerLine {
    pub tally: char,
    pub remote: String,
    pub refid: String,
    pub stratum: u8,
    /// Decoded from the octal column.
    pub reach: u8,
    pub offset: f64,
    pub jitter: f64,
}

impl PeerLine {
    pub fn parse(line: &str) -> Result<Self, NtpqError> {
        let (tally, rest) = match line.chars().next() {
            Some(c) if TALLY_CODES.contains(&c) => (c, &line[c.len_utf8()..]),
            _ => (' ', line),
        };

        let cols: Vec<&str> = rest.split_whitespace().collect();
        if cols.len() < PEER_COLUMNS {
            return Err(NtpqError::MissingColumns {
                expected: PEER_COLUMNS,
                found: cols.len(),
            });
        }

        Ok(Self {
            tally,
            remote: cols[0].to_string(),
            refid: cols[1].to_string(),
            stratum: cols[2].parse().unwrap_or(0),
            reach: u8::from_str_radix(cols[6], 8).unwrap_or(0),
            offset: cols[8].parse().unwrap_or(0.0),
            jitter: cols[9].parse().unwrap_or(0.0),
        })
    }

    /// `*` system peer, `o` PPS-disciplined system peer.
    pub fn is_system_peer(&self) -> bool {
        matches!(self.tally, '*' | 'o')
    }

    pub fn matches_any(&self, markers: &[String]) -> bool {
        markers
            .iter()
            .any(|m| self.remote.contains(m.as_str()) || self.refid.contains(m.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeerTable {
    pub peers: Vec<PeerLine>,
}

impl PeerTable {
    pub fn parse(raw: &str) -> Self {
        let mut peers = Vec::new();
        for line in raw.lines() {
            if line.trim().is_empty() || is_header(line) {
                continue;
            }
            match PeerLine::parse(line) {
                Ok(peer) => peers.push(peer),
                Err(e) => log::debug!("Skipping ntpq row {:?}: {}", line, e),
            }
        }
        Self { peers }
    }

    pub fn system_peer(&self) -> Option<&PeerLine> {
        self.peers.iter().find(|p| p.is_system_peer())
    }

    /// Whether the GPS refclock is the one NTP currently follows.
    pub fn gps_is_system_peer(&self, markers: &[String]) -> bool {
        self.system_peer().is_some_and(|p| p.matches_any(markers))
    }
}

fn is_header(line: &str) -> bool {
    (line.contains("remote") && line.contains("refid")) || line.trim_start().starts_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "     remote           refid      st t when poll reach   delay   offset  jitter
==============================================================================
*GPS_NMEA(3)     .GPS.            0 l    5   16  377    0.000   -0.312   0.215
+time.cloudflare 10.4.2.12        3 u   33   64  376   12.345    1.234   0.567
 pool.ntp.org    .POOL.          16 p    -   64    0    0.000    0.000   0.000
x10.0.0.9        .INIT.          16 u    - 1024    0    0.000    0.000";

    fn markers() -> Vec<String> {
        vec!["127.127.20.".to_string(), ".GPS.".to_string()]
    }

    #[test]
    fn test_parse_peer_line() {
        let peer = PeerLine::parse(
            "*GPS_NMEA(3)     .GPS.            0 l    5   16  377    0.000   -0.312   0.215",
        )
        .unwrap();
        assert_eq!(peer.tally, '*');
        assert_eq!(peer.remote, "GPS_NMEA(3)");
        assert_eq!(peer.refid, ".GPS.");
        assert_eq!(peer.stratum, 0);
        assert_eq!(peer.reach, 255);
        assert!((peer.offset + 0.312).abs() < 1e-9);
        assert!((peer.jitter - 0.215).abs() < 1e-9);
        assert!(peer.is_system_peer());
    }

    #[test]
    fn test_parse_peer_line_short_row() {
        let err = PeerLine::parse("*GPS_NMEA(3) .GPS. 0 l").unwrap_err();
        assert_eq!(
            err,
            NtpqError::MissingColumns {
                expected: 10,
                found: 4
            }
        );
    }

    #[test]
    fn test_bad_numeric_columns_default() {
        let peer = PeerLine::parse("oLOCAL(0) .LOCL. x l 5 16 999 0.000 n/a -").unwrap();
        assert_eq!(peer.stratum, 0);
        assert_eq!(peer.reach, 0);
        assert_eq!(peer.offset, 0.0);
        assert_eq!(peer.jitter, 0.0);
        assert!(peer.is_system_peer());
    }

    #[test]
    fn test_parse_table() {
        let table = PeerTable::parse(SAMPLE);
        // header, separator and the short row are dropped
        assert_eq!(table.peers.len(), 3);
        assert_eq!(table.peers[1].reach, 0o376);
        assert_eq!(table.peers[2].tally, ' ');
        assert_eq!(table.peers[2].stratum, 16);

        let sys = table.system_peer().unwrap();
        assert_eq!(sys.remote, "GPS_NMEA(3)");
        assert!(table.gps_is_system_peer(&markers()));
    }

    #[test]
    fn test_web_fallback_peer() {
        let raw = " GPS_NMEA(3) .GPS. 0 l 5 16 0 0.000 0.000 0.000\n\
*time.cloudflare 10.4.2.12 3 u 33 64 377 12.345 1.234 0.567";
        let table = PeerTable::parse(raw);
        assert_eq!(table.system_peer().unwrap().stratum, 3);
        assert!(!table.gps_is_system_peer(&markers()));
        assert!(PeerTable::parse("").system_peer().is_none());
    }
}
