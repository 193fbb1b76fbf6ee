use crate::ArticleError;
use chrono::NaiveDate;

/// Parses a publication date written as `DD.MM.YYYY`
///
/// Surrounding whitespace is ignored. Anything else that deviates from the
/// exact two-digit day, two-digit month, four-digit year shape is rejected,
/// as are impossible dates such as `31.02.2021`.
///
/// # Examples
///
/// ```
/// use article_sieve::unify_date_format;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     unify_date_format("05.03.2021").unwrap(),
///     NaiveDate::from_ymd_opt(2021, 3, 5).unwrap()
/// );
/// assert!(unify_date_format("2021-03-05").is_err());
/// ```
pub fn unify_date_format(date_str: &str) -> Result<NaiveDate, ArticleError> {
    let trimmed = date_str.trim();
    let error = || ArticleError::DateFormat(date_str.to_string());

    if !has_date_shape(trimmed) {
        return Err(error());
    }

    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").map_err(|_| error())
}

/// `DD.MM.YYYY`: ten ASCII characters with dots at positions 2 and 5
fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        })
}
