use crate::errors::AppError;

/// Parse "HH:MM" into minutes since midnight. Out-of-range or non-numeric
/// input is an error, never clamped.
pub fn to_minutes(time: &str) -> Result<i32, AppError> {
    let (h, m) = time
        .split_once(':')
        .ok_or_else(|| AppError::MalformedTime(time.to_string()))?;

    let hour: i32 = h
        .parse()
        .map_err(|_| AppError::MalformedTime(time.to_string()))?;
    let minute: i32 = m
        .parse()
        .map_err(|_| AppError::MalformedTime(time.to_string()))?;

    if !(0..=23).contains(&hour) || !(0..=59).contains(&minute) {
        return Err(AppError::MalformedTime(time.to_string()));
    }

    Ok(hour * 60 + minute)
}

pub fn from_minutes(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn add_minutes(time: &str, minutes: i32) -> Result<String, AppError> {
    Ok(from_minutes(to_minutes(time)? + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minutes() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("09:30").unwrap(), 570);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_to_minutes_rejects_malformed() {
        assert!(matches!(to_minutes("0930"), Err(AppError::MalformedTime(_))));
        assert!(matches!(to_minutes("ab:cd"), Err(AppError::MalformedTime(_))));
        assert!(matches!(to_minutes("24:00"), Err(AppError::MalformedTime(_))));
        assert!(matches!(to_minutes("12:60"), Err(AppError::MalformedTime(_))));
        assert!(matches!(to_minutes("-1:00"), Err(AppError::MalformedTime(_))));
        assert!(matches!(to_minutes(""), Err(AppError::MalformedTime(_))));
    }

    #[test]
    fn test_from_minutes() {
        assert_eq!(from_minutes(0), "00:00");
        assert_eq!(from_minutes(570), "09:30");
        assert_eq!(from_minutes(1439), "23:59");
    }

    #[test]
    fn test_add_minutes() {
        assert_eq!(add_minutes("09:00", 60).unwrap(), "10:00");
        assert_eq!(add_minutes("10:45", 30).unwrap(), "11:15");
        assert!(add_minutes("25:00", 30).is_err());
    }
}
