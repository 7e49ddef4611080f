use api_types::month::MonthOption;
use thiserror::Error;

use super::filter::MonthYear;

/// Locale-independent month-name table. The store sends English display
/// names; mapping them through this table instead of date parsing means an
/// unexpected label is an explicit error rather than a filter that silently
/// matches nothing.
const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized month name: {0}")]
pub struct UnknownMonth(pub String);

/// Maps an English month name (any case) to its 1-based index.
pub fn month_index(name: &str) -> Result<u32, UnknownMonth> {
    let lower = name.trim().to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|month| *month == lower)
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| UnknownMonth(name.to_string()))
}

/// A catalog entry resolved to structured values, ready for filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthEntry {
    pub month: MonthYear,
    pub label: String,
}

/// Resolves the raw `/list_months` catalog into structured entries.
///
/// Any entry whose month label is not in the lookup table fails the whole
/// resolution; the caller reports it instead of filtering against garbage.
pub fn resolve_catalog(options: &[MonthOption]) -> Result<Vec<MonthEntry>, UnknownMonth> {
    options
        .iter()
        .map(|opt| {
            let month = month_index(&opt.month)?;
            Ok(MonthEntry {
                month: MonthYear {
                    month,
                    year: opt.year,
                },
                label: format!("{} {}", opt.month, opt.year),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_month_name_maps_to_its_index() {
        let names = [
            ("January", 1),
            ("february", 2),
            ("MARCH", 3),
            ("April", 4),
            ("may", 5),
            ("June", 6),
            ("July", 7),
            ("August", 8),
            ("september", 9),
            ("October", 10),
            ("November", 11),
            ("December", 12),
        ];
        for (name, index) in names {
            assert_eq!(month_index(name), Ok(index), "{name}");
        }
    }

    #[test]
    fn unknown_names_are_rejected_not_ignored() {
        assert!(month_index("Marzo").is_err());
        assert!(month_index("").is_err());
    }

    #[test]
    fn catalog_resolution_fails_on_bad_entries() {
        let options = vec![
            MonthOption {
                month: "March".to_string(),
                year: 2024,
            },
            MonthOption {
                month: "Smarch".to_string(),
                year: 2024,
            },
        ];
        assert_eq!(
            resolve_catalog(&options),
            Err(UnknownMonth("Smarch".to_string()))
        );

        let good = resolve_catalog(&options[..1]).expect("valid catalog");
        assert_eq!(good[0].month, MonthYear { month: 3, year: 2024 });
        assert_eq!(good[0].label, "March 2024");
    }
}
