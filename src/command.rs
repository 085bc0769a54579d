use crate::error::BannerError;

/// Control requests a host can send to a running banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Next,
    Prev,
    Seek(usize),
}

impl Command {
    /// Parses a method-style command name, as issued by page scripts.
    pub fn from_method(method: &str, arg: Option<usize>) -> Result<Self, BannerError> {
        match (method, arg) {
            ("start", _) => Ok(Self::Start),
            ("stop", _) => Ok(Self::Stop),
            ("next" | "showNextImage", _) => Ok(Self::Next),
            ("prev" | "showPrevImage", _) => Ok(Self::Prev),
            ("setPosition" | "seek", Some(index)) => Ok(Self::Seek(index)),
            _ => Err(BannerError::UnknownCommand(method.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_method_known_names() {
        assert_eq!(Command::from_method("start", None).unwrap(), Command::Start);
        assert_eq!(Command::from_method("stop", Some(3)).unwrap(), Command::Stop);
        assert_eq!(Command::from_method("showNextImage", None).unwrap(), Command::Next);
        assert_eq!(Command::from_method("prev", None).unwrap(), Command::Prev);
        assert_eq!(Command::from_method("setPosition", Some(2)).unwrap(), Command::Seek(2));
    }

    #[test]
    fn test_from_method_rejects_unknown_or_incomplete() {
        assert!(matches!(
            Command::from_method("explode", None),
            Err(BannerError::UnknownCommand(name)) if name == "explode"
        ));
        assert!(matches!(
            Command::from_method("setPosition", None),
            Err(BannerError::UnknownCommand(_))
        ));
    }
}
