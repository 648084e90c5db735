//! Built-in string predicates for rule checks.
//!
//! Predicate names and option semantics follow validator.js (`isInt`,
//! `isEmail`, `isLength`, ...). Each predicate receives the stringified field
//! value plus the rule's extra parameters; options are read from the first
//! parameter when it is an object. Address-like formats are delegated to the
//! `validator`, `url` and `uuid` crates, with the stricter validator.js
//! defaults layered on top.

use crate::ports::RuleLibrary;
use regex::Regex;
use serde_json::Value;
use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};
use url::{Host, Url};
use uuid::Uuid;
use validator::{ValidateEmail, ValidateIp, ValidateLength};

/// Signature shared by every predicate.
pub type Predicate = Arc<dyn Fn(&str, &[Value]) -> bool + Send + Sync>;

const MATCHES_RULE: &str = "matches";
const URL_PROTOCOLS: [&str; 3] = ["http", "https", "ftp"];
const MAX_URL_LENGTH: usize = 2083;
const HYPHENATED_UUID_LENGTH: usize = 36;
const MAX_PORT: u32 = 65_535;

/// Rule library backed by the built-in predicate set.
///
/// Additional predicates can be registered with
/// [`StandardRuleLibrary::with_predicate`]; a registered name shadows a
/// built-in one. Patterns used by `matches` are compiled once and shared by
/// clones of the library.
///
/// # Examples
///
/// ```
/// use paramguard::adapters::StandardRuleLibrary;
/// use paramguard::ports::RuleLibrary;
/// use serde_json::json;
///
/// let library = StandardRuleLibrary::new();
/// assert_eq!(library.check("isInt", "42", &[]), Some(true));
/// assert_eq!(library.check("isLength", "abc", &[json!({ "min": 6 })]), Some(false));
/// assert_eq!(library.check("isUnknown", "abc", &[]), None);
/// ```
#[derive(Clone, Default)]
pub struct StandardRuleLibrary {
    extra: HashMap<String, Predicate>,
    patterns: Arc<RwLock<HashMap<String, Option<Regex>>>>,
}

impl StandardRuleLibrary {
    /// Creates a library exposing only the built-in predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an additional predicate under `name`.
    #[must_use]
    pub fn with_predicate<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.extra.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Tests `input` against the pattern in the first parameter, with
    /// optional `i`, `m` and `s` flags in the second.
    ///
    /// An invalid pattern never matches; it is cached like a valid one.
    fn matches(&self, input: &str, params: &[Value]) -> bool {
        let Some(source) = pattern_source(params) else {
            return false;
        };
        let cached = self
            .patterns
            .read()
            .ok()
            .and_then(|patterns| patterns.get(&source).cloned());
        let regex = cached.unwrap_or_else(|| {
            let compiled = Regex::new(&source).ok();
            if let Ok(mut patterns) = self.patterns.write() {
                patterns.insert(source.clone(), compiled.clone());
            }
            compiled
        });
        regex.is_some_and(|regex| regex.is_match(input))
    }
}

impl fmt::Debug for StandardRuleLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("StandardRuleLibrary")
            .field("extra", &names)
            .finish_non_exhaustive()
    }
}

impl RuleLibrary for StandardRuleLibrary {
    fn check(&self, name: &str, input: &str, params: &[Value]) -> Option<bool> {
        if let Some(predicate) = self.extra.get(name) {
            return Some(predicate(input, params));
        }
        if name == MATCHES_RULE {
            return Some(self.matches(input, params));
        }
        builtin(name).map(|predicate| predicate(input, params))
    }

    fn supports(&self, name: &str) -> bool {
        self.extra.contains_key(name) || name == MATCHES_RULE || builtin(name).is_some()
    }
}

fn builtin(name: &str) -> Option<fn(&str, &[Value]) -> bool> {
    let predicate: fn(&str, &[Value]) -> bool = match name {
        "isInt" => is_int,
        "isFloat" => is_float,
        "isNumeric" => is_numeric,
        "isBoolean" => is_boolean,
        "isEmail" => is_email,
        "isLength" => is_length,
        "isEmpty" => is_empty,
        "isAlpha" => |input, _| !input.is_empty() && input.chars().all(|c| c.is_ascii_alphabetic()),
        "isAlphanumeric" => {
            |input, _| !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric())
        }
        "isAscii" => |input, _| !input.is_empty() && input.is_ascii(),
        "isLowercase" => |input, _| input == input.to_lowercase(),
        "isUppercase" => |input, _| input == input.to_uppercase(),
        "isHexadecimal" => is_hexadecimal,
        "isUUID" => is_uuid,
        "isIP" => is_ip,
        "isPort" => is_port,
        "isURL" => is_url,
        "isJSON" => is_json,
        "isIn" => is_in,
        "equals" => |input, params| params.first().is_some_and(|other| input == param_text(other)),
        "contains" => contains,
        _ => return None,
    };
    Some(predicate)
}

fn options(params: &[Value]) -> Option<&serde_json::Map<String, Value>> {
    params.first().and_then(Value::as_object)
}

fn option<'a>(params: &'a [Value], key: &str) -> Option<&'a Value> {
    options(params).and_then(|map| map.get(key))
}

fn option_number(params: &[Value], key: &str) -> Option<f64> {
    option(params, key).and_then(value_number)
}

fn option_flag(params: &[Value], key: &str) -> bool {
    option(params, key).is_some_and(|flag| flag.as_bool().unwrap_or(false))
}

fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn value_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn param_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => crate::validation::stringify(other),
    }
}

fn within_range(number: f64, params: &[Value]) -> bool {
    option_number(params, "min").is_none_or(|min| number >= min)
        && option_number(params, "max").is_none_or(|max| number <= max)
        && option_number(params, "lt").is_none_or(|lt| number < lt)
        && option_number(params, "gt").is_none_or(|gt| number > gt)
}

fn unsigned(input: &str) -> &str {
    input.strip_prefix(['+', '-']).unwrap_or(input)
}

/// One or more ASCII digits.
fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Zero or more ASCII digits.
fn only_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

fn is_int(input: &str, params: &[Value]) -> bool {
    let allow_leading_zeroes = option(params, "allow_leading_zeroes")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let digits = unsigned(input);
    let leading_ok = allow_leading_zeroes || digits == "0" || !digits.starts_with('0');
    is_digits(digits)
        && leading_ok
        && input
            .parse::<f64>()
            .is_ok_and(|number| within_range(number, params))
}

/// Optional sign, digits with an optional fraction, optional exponent.
fn is_decimal_literal(input: &str) -> bool {
    let (mantissa, exponent) = match unsigned(input).split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned(input), None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => {
            only_digits(whole)
                && only_digits(fraction)
                && !(whole.is_empty() && fraction.is_empty())
        }
        None => is_digits(mantissa),
    };
    mantissa_ok && exponent.is_none_or(|exponent| is_digits(unsigned(exponent)))
}

fn is_float(input: &str, params: &[Value]) -> bool {
    is_decimal_literal(input)
        && input
            .parse::<f64>()
            .is_ok_and(|number| within_range(number, params))
}

fn is_numeric(input: &str, params: &[Value]) -> bool {
    if option_flag(params, "no_symbols") {
        return is_digits(input);
    }
    match unsigned(input).split_once('.') {
        Some((whole, fraction)) => only_digits(whole) && is_digits(fraction),
        None => is_digits(unsigned(input)),
    }
}

fn is_boolean(input: &str, params: &[Value]) -> bool {
    if option_flag(params, "loose") {
        let lowered = input.to_ascii_lowercase();
        matches!(lowered.as_str(), "true" | "false" | "1" | "0" | "yes" | "no")
    } else {
        matches!(input, "true" | "false" | "1" | "0")
    }
}

/// The final label is at least two letters, or an IDNA `xn--` label.
fn has_top_level_domain(host: &str) -> bool {
    host.rsplit_once('.').is_some_and(|(_, tld)| {
        tld.starts_with("xn--")
            || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
    })
}

/// RFC checks come from `validator`; dot placement in the local part and a
/// top-level domain are required on top, as validator.js does.
fn is_email(input: &str, _params: &[Value]) -> bool {
    let Some((user, domain)) = input.rsplit_once('@') else {
        return false;
    };
    user.split('.').all(|part| !part.is_empty())
        && has_top_level_domain(domain)
        && input.validate_email()
}

/// Accepts `{ min, max }` options or positional `min, max` parameters.
/// Length is counted in characters.
fn is_length(input: &str, params: &[Value]) -> bool {
    let (min, max) = if options(params).is_some() {
        (
            option(params, "min").and_then(value_count),
            option(params, "max").and_then(value_count),
        )
    } else {
        (
            params.first().and_then(value_count),
            params.get(1).and_then(value_count),
        )
    };
    input.validate_length(min, max, None)
}

fn is_empty(input: &str, params: &[Value]) -> bool {
    if option_flag(params, "ignore_whitespace") {
        input.trim().is_empty()
    } else {
        input.is_empty()
    }
}

fn is_hexadecimal(input: &str, _params: &[Value]) -> bool {
    let digits = ["0x", "0X", "0h", "0H"]
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix))
        .unwrap_or(input);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Hyphenated form only; an optional first parameter pins the version
/// nibble (`"all"` accepts any).
fn is_uuid(input: &str, params: &[Value]) -> bool {
    input.len() == HYPHENATED_UUID_LENGTH
        && Uuid::try_parse(input).is_ok_and(|uuid| {
            match params.first().map(param_text).as_deref() {
                None | Some("all") => true,
                Some(version) => version
                    .parse::<usize>()
                    .is_ok_and(|expected| uuid.get_version_num() == expected),
            }
        })
}

fn is_ip(input: &str, params: &[Value]) -> bool {
    match params.first().map(param_text).as_deref() {
        Some("4") => input.validate_ipv4(),
        Some("6") => input.validate_ipv6(),
        _ => input.validate_ip(),
    }
}

fn is_port(input: &str, _params: &[Value]) -> bool {
    is_digits(input)
        && (input == "0" || !input.starts_with('0'))
        && input.parse::<u32>().is_ok_and(|port| port <= MAX_PORT)
}

/// http, https and ftp URLs with a resolvable host; a missing protocol is
/// read as http.
fn is_url(input: &str, _params: &[Value]) -> bool {
    if input.is_empty()
        || input.len() >= MAX_URL_LENGTH
        || input.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
    {
        return false;
    }
    let candidate = if input.contains("://") {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("http://{input}"))
    };
    Url::parse(&candidate).is_ok_and(|url| {
        URL_PROTOCOLS.contains(&url.scheme())
            && match url.host() {
                Some(Host::Domain(domain)) => has_top_level_domain(domain),
                Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
                None => false,
            }
    })
}

fn is_json(input: &str, params: &[Value]) -> bool {
    let allow_primitives = option_flag(params, "allow_primitives");
    serde_json::from_str::<Value>(input).is_ok_and(|parsed| {
        parsed.is_object()
            || parsed.is_array()
            || (allow_primitives && (parsed.is_boolean() || parsed.is_null()))
    })
}

fn is_in(input: &str, params: &[Value]) -> bool {
    match params.first() {
        Some(Value::Array(allowed)) => allowed.iter().any(|option| param_text(option) == input),
        Some(Value::Object(allowed)) => allowed.contains_key(input),
        Some(Value::String(allowed)) => allowed.contains(input),
        _ => false,
    }
}

fn contains(input: &str, params: &[Value]) -> bool {
    let Some(seed) = params.first().map(param_text) else {
        return false;
    };
    let ignore_case = params
        .get(1)
        .and_then(|options| options.get("ignoreCase"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if ignore_case {
        input.to_lowercase().contains(&seed.to_lowercase())
    } else {
        input.contains(&seed)
    }
}

fn pattern_source(params: &[Value]) -> Option<String> {
    let pattern = params.first().and_then(Value::as_str)?;
    let flags: String = params
        .get(1)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .chars()
        .filter(|flag| matches!(flag, 'i' | 'm' | 's'))
        .collect();
    Some(if flags.is_empty() {
        pattern.to_owned()
    } else {
        format!("(?{flags}){pattern}")
    })
}
