//! GPS time reference quality monitoring.
//!
//! Decodes NMEA sentences from a GPS receiver, scores signal quality (IQT)
//! and scores the health of the NTP service that the receiver disciplines.

pub mod config;
pub mod health;
pub mod iqt;
pub mod nmea;
pub mod ntpq;
