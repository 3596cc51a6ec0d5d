/// Descriptor for a UCI spin option: an integer with an inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct SpinOption {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
}

impl SpinOption {
    /// Parses and range-checks a value received via `setoption`.
    pub fn parse(&self, value: &str) -> Result<i64, String> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|e| format!("invalid integer for {}: {}", self.name, e))?;
        if !(self.min..=self.max).contains(&parsed) {
            return Err(format!(
                "{} = {} out of range [{}, {}]",
                self.name, parsed, self.min, self.max
            ));
        }
        Ok(parsed)
    }

    /// The `option name ...` declaration line sent in reply to `uci`.
    pub fn declaration<T: ToString>(&self, default: T) -> String {
        format!(
            "option name {} type spin default {} min {} max {}",
            self.name,
            default.to_string(),
            self.min,
            self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREADS: SpinOption = SpinOption {
        name: "Threads",
        min: 1,
        max: 256,
    };

    #[test]
    fn parses_values_in_range() {
        assert_eq!(THREADS.parse("4"), Ok(4));
        assert_eq!(THREADS.parse(" 1 "), Ok(1));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(THREADS.parse("0").is_err());
        assert!(THREADS.parse("1000").is_err());
        assert!(THREADS.parse("four").is_err());
    }

    #[test]
    fn declares_itself() {
        assert_eq!(
            THREADS.declaration(1),
            "option name Threads type spin default 1 min 1 max 256"
        );
    }
}
