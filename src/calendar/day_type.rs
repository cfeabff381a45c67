use std::fmt;
use std::str::FromStr;

/// Season bucket of a standard load profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Winter,
    Summer,
    Transition,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Winter, Season::Summer, Season::Transition];

    /// Lowercase identifier used in CSV headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Summer => "summer",
            Season::Transition => "transition",
        }
    }
}

/// Day-type bucket of a standard load profile. Public holidays count as `Sunday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    Workday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Workday, DayType::Saturday, DayType::Sunday];

    /// Lowercase identifier used in CSV headers.
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Workday => "workday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "summer" => Ok(Season::Summer),
            "transition" => Ok(Season::Transition),
            other => Err(format!("unknown season \"{other}\"")),
        }
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workday" => Ok(DayType::Workday),
            "saturday" => Ok(DayType::Saturday),
            "sunday" => Ok(DayType::Sunday),
            other => Err(format!("unknown day type \"{other}\"")),
        }
    }
}
