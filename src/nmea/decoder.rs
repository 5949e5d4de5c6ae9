use super::parsing::{parse_rmc_datetime, raw_to_decimal, sentence_fields};
use super::types::{FixRecord, SatelliteQualitySnapshot, SentenceKind};

const RMC_MIN_FIELDS: usize = 10;
const GGA_SATS: usize = 7;
// 12 fixed satellite slots precede PDOP/HDOP/VDOP.
const GSA_HDOP: usize = 16;
const GSV_MSG_NUM: usize = 2;
const GSV_FIRST_BLOCK: usize = 4;
const GSV_BLOCK_LEN: usize = 4;

/// Decodes an RMC sentence into a fix record.
///
/// Anything that is not an RMC sentence, or an RMC with fewer than ten
/// fields, yields an invalid record carrying only the raw text.
pub fn decode(line: &str) -> FixRecord {
    let mut record = FixRecord::from_raw(line);

    let Some(fields) = sentence_fields(line) else {
        return record;
    };
    if SentenceKind::from_address(fields[0]) == Some(SentenceKind::Rmc) {
        decode_rmc(&fields, &mut record);
    }
    record
}

fn decode_rmc(fields: &[&str], record: &mut FixRecord) {
    if fields.len() < RMC_MIN_FIELDS {
        return;
    }

    record.is_valid = fields[2] == "A";
    record.utc_time = parse_rmc_datetime(fields[1], fields[9]);

    // A void fix keeps the default position whatever the fields say.
    if !record.is_valid {
        return;
    }

    if let Ok(lat) = fields[3].parse::<f64>() {
        record.latitude = raw_to_decimal(lat, fields[4]);
    }
    if let Ok(lon) = fields[5].parse::<f64>() {
        record.longitude = raw_to_decimal(lon, fields[6]);
    }
}

/// Folds a GGA, GSA or GSV sentence into the accumulated quality state.
///
/// Unparseable fields leave the previous value in place.
pub fn update_quality_state(line: &str, state: &mut SatelliteQualitySnapshot) {
    let Some(fields) = sentence_fields(line) else {
        return;
    };

    match SentenceKind::from_address(fields[0]) {
        Some(SentenceKind::Gga) => {
            if let Some(count) = fields.get(GGA_SATS).and_then(|f| f.parse::<u32>().ok()) {
                state.satellite_count = count;
            }
        }
        Some(SentenceKind::Gsa) => {
            if let Some(hdop) = fields.get(GSA_HDOP).and_then(|f| f.parse::<f64>().ok()) {
                state.hdop = hdop;
            }
        }
        Some(SentenceKind::Gsv) => accumulate_gsv(&fields, state),
        _ => {}
    }
}

fn accumulate_gsv(fields: &[&str], state: &mut SatelliteQualitySnapshot) {
    let msg_num = fields.get(GSV_MSG_NUM).and_then(|f| f.parse::<u32>().ok());
    if msg_num == Some(1) {
        state.snr_samples.clear();
    }

    let mut i = GSV_FIRST_BLOCK;
    while i + GSV_BLOCK_LEN <= fields.len() {
        let snr = fields[i + 3];
        if !snr.trim().is_empty() {
            if let Ok(snr) = snr.parse::<u32>() {
                state.snr_samples.push(snr);
            }
        }
        i += GSV_BLOCK_LEN;
    }
}
