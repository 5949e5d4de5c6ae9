use std::collections::BTreeMap;

const TIMECODE_KEY: &str = "timecode=\"";

/// Key/value view of `ntpq -c clockvar` output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockVar {
    values: BTreeMap<String, String>,
}

impl ClockVar {
    /// The quoted timecode carries commas of its own, so it is lifted out
    /// before the rest is split into `key=value` pairs.
    pub fn parse(raw: &str) -> Self {
        let mut values = BTreeMap::new();
        let (timecode, rest) = split_timecode(raw);

        for part in rest.split([',', '\n', '\r']) {
            let mut kv = part.split('=');
            let (Some(key), Some(value), None) = (kv.next(), kv.next(), kv.next()) else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), value.trim().trim_matches('"').to_string());
        }

        if let Some(timecode) = timecode {
            values.insert("timecode".to_string(), timecode);
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn timecode(&self) -> &str {
        self.get("timecode").unwrap_or_default()
    }

    pub fn refid(&self) -> &str {
        self.get("refid").unwrap_or_default()
    }

    pub fn stratum(&self) -> u8 {
        self.number("stratum").try_into().unwrap_or(0)
    }

    pub fn poll(&self) -> u64 {
        self.number("poll")
    }

    pub fn noreply(&self) -> u64 {
        self.number("noreply")
    }

    pub fn badformat(&self) -> u64 {
        self.number("badformat")
    }

    /// Leading digits of a value, 0 when absent.
    pub fn number(&self, key: &str) -> u64 {
        let Some(value) = self.get(key) else {
            return 0;
        };
        let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }
}

fn split_timecode(raw: &str) -> (Option<String>, String) {
    let Some(start) = raw.find(TIMECODE_KEY) else {
        return (None, raw.to_string());
    };
    let value_start = start + TIMECODE_KEY.len();
    let Some(len) = raw[value_start..].find('"') else {
        return (None, raw.to_string());
    };
    let value_end = value_start + len;

    let timecode = raw[value_start..value_end].to_string();
    let rest = format!("{}{}", &raw[..start], &raw[value_end + 1..]);
    (Some(timecode), rest)
}
