//! Command-line argument activation source.

use super::ActivationSource;
use super::activation_source::parse_value;
use std::collections::HashMap;

/// Flag prefix for toggle arguments (`-T<name>`).
pub const FLAG_PREFIX: &str = "-T";

/// Command-line argument activation source.
///
/// Recognises `-T<name> <value>` and `-T<name>=<value>`. Other arguments are
/// ignored, so the source can be fed the full argument list of an application.
/// When a flag repeats, the last occurrence wins.
///
/// # Examples
///
/// ```rust
/// use hotswap_toggle::sources::{ActivationSource, ArgsSource};
///
/// let source = ArgsSource::parse(["--verbose", "-Tcheckout", "1", "-Tsearch=2"]);
/// assert_eq!(source.resolve("checkout"), Some(1));
/// assert_eq!(source.resolve("search"), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct ArgsSource {
    values: HashMap<String, String>,
    priority: i32,
}

impl ArgsSource {
    /// Parse toggle flags out of an argument list.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = HashMap::new();
        let mut args = args.into_iter().map(Into::into).peekable();

        while let Some(arg) = args.next() {
            let Some(flag) = arg.strip_prefix(FLAG_PREFIX) else {
                continue;
            };
            if flag.is_empty() {
                continue;
            }

            if let Some((name, value)) = flag.split_once('=') {
                values.insert(name.to_string(), value.to_string());
                continue;
            }

            match args.next_if(|next: &String| !next.starts_with(FLAG_PREFIX)) {
                Some(value) => {
                    values.insert(flag.to_string(), value);
                }
                None => tracing::debug!(flag = %arg, "Toggle flag without a value"),
            }
        }

        Self {
            values,
            priority: 300,
        }
    }

    /// Parse the arguments of the running process, skipping the program name.
    pub fn from_process() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ActivationSource for ArgsSource {
    fn resolve(&self, name: &str) -> Option<i64> {
        let raw = self.values.get(name)?;
        parse_value("args", name, raw)
    }

    fn name(&self) -> String {
        format!("args:{}*", FLAG_PREFIX)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
