//! String format checks
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::node::StringFormat;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static HOSTNAME_REGEX: OnceLock<Regex> = OnceLock::new();
static BASE64_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .expect("email pattern compiles")
    })
}

fn hostname_regex() -> &'static Regex {
    HOSTNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("hostname pattern compiles")
    })
}

fn base64_regex() -> &'static Regex {
    BASE64_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
            .expect("base64 pattern compiles")
    })
}

/// Whether `value` is a well-formed instance of `format`
pub fn is_valid_format(format: StringFormat, value: &str) -> bool {
    match format {
        StringFormat::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        StringFormat::DateTime => DateTime::parse_from_rfc3339(value).is_ok(),
        StringFormat::Email => email_regex().is_match(value),
        StringFormat::Uuid => uuid::Uuid::try_parse(value).is_ok(),
        StringFormat::Uri => url::Url::parse(value).is_ok(),
        StringFormat::Hostname => value.len() <= 253 && hostname_regex().is_match(value),
        StringFormat::Ipv4 => value.parse::<Ipv4Addr>().is_ok(),
        StringFormat::Ipv6 => value.parse::<Ipv6Addr>().is_ok(),
        StringFormat::Byte => base64_regex().is_match(value),
        // Documentation hints only.
        StringFormat::Password | StringFormat::Binary => true,
    }
}
