//! Calendar grid extraction
//!
//! The calendar DOM only exists inside the loaded page, so the walk
//! runs there as an evaluated script. The script returns nothing but
//! JSON-serializable raw strings; all numeric coercion happens on this
//! side of the boundary in [`parse_grid`], which either yields a fully
//! typed [`GraphResponse`] or a classified failure. Nothing is ever
//! silently zeroed, reordered, or filtered: the downstream renderer
//! places geometry by positional index.

use serde::Deserialize;

use crate::browser::Session;
use crate::error::{Result, SkygraphError};
use crate::graph::{DayRecord, GraphResponse, WeekRecord};

/// DOM walk evaluated in the page's own document context.
///
/// Weeks are the direct child groups of the calendar container in
/// document order (left-to-right); day cells are the `rect` elements of
/// each group in document order (top-to-bottom, chronological).
/// Attribute values come back as raw strings; missing attributes come
/// back empty and fail the typed parse on our side.
pub(crate) const EXTRACT_SCRIPT: &str = r#"
(() => {
  const root = document.querySelector('.js-calendar-graph svg g');
  if (!root) {
    return { found: false, weeks: [] };
  }
  return {
    found: true,
    weeks: Array.from(root.querySelectorAll('g')).map((week) => ({
      days: Array.from(week.querySelectorAll('rect')).map((day) => ({
        date: day.dataset.date || '',
        level: day.dataset.level || '',
        count: day.dataset.count || '',
      })),
    })),
  };
})()
"#;

/// Untyped extraction payload as it crosses the page boundary.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGrid {
    pub found: bool,
    #[serde(default)]
    pub weeks: Vec<RawWeek>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawWeek {
    #[serde(default)]
    pub days: Vec<RawCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCell {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub count: String,
}

/// Run the extraction script in the session's page and parse the result.
///
/// # Errors
///
/// Returns [`SkygraphError::MarkupNotFound`] if the calendar container
/// is absent or the script cannot run against the loaded document, and
/// [`SkygraphError::Parse`] if a day cell carries non-numeric
/// attributes.
pub async fn extract(session: &Session) -> Result<GraphResponse> {
    let raw: RawGrid = session
        .page()
        .evaluate(EXTRACT_SCRIPT)
        .await
        .map_err(|e| {
            SkygraphError::MarkupNotFound(format!("calendar extraction script failed: {}", e))
        })?
        .into_value()
        .map_err(|e| {
            SkygraphError::MarkupNotFound(format!(
                "calendar extraction returned an unreadable value: {}",
                e
            ))
        })?;

    parse_grid(raw)
}

/// Typed parse of the raw extraction payload.
///
/// Single pass: running `lowest`/`highest` are updated as each cell is
/// parsed. Both start at 0; with non-negative counts the minimum never
/// moves, and the renderer normalizes against exactly that resting
/// value.
pub(crate) fn parse_grid(raw: RawGrid) -> Result<GraphResponse> {
    if !raw.found {
        return Err(SkygraphError::MarkupNotFound(
            "contribution calendar container is missing from the page".to_string(),
        )
        .into());
    }

    let mut lowest: u32 = 0;
    let mut highest: u32 = 0;
    let mut weeks = Vec::with_capacity(raw.weeks.len());

    for week in raw.weeks {
        let mut days = Vec::with_capacity(week.days.len());
        for cell in week.days {
            let level = parse_attr(&cell.date, "level", &cell.level)?;
            let count = parse_attr(&cell.date, "count", &cell.count)?;
            if count > highest {
                highest = count;
            }
            if count < lowest {
                lowest = count;
            }
            days.push(DayRecord {
                date: cell.date,
                level,
                count,
            });
        }
        weeks.push(WeekRecord { days });
    }

    Ok(GraphResponse {
        weeks,
        lowest,
        highest,
    })
}

fn parse_attr(date: &str, name: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| {
        SkygraphError::Parse(format!(
            "day cell {:?} has a non-numeric {} attribute: {:?}",
            date, name, value
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(date: &str, level: &str, count: &str) -> RawCell {
        RawCell {
            date: date.to_string(),
            level: level.to_string(),
            count: count.to_string(),
        }
    }

    fn one_week(levels: &[u32], counts: &[u32]) -> RawGrid {
        let days = levels
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(i, (level, count))| {
                cell(
                    &format!("2023-10-0{}", i + 1),
                    &level.to_string(),
                    &count.to_string(),
                )
            })
            .collect();
        RawGrid {
            found: true,
            weeks: vec![RawWeek { days }],
        }
    }

    fn classification_of(result: Result<GraphResponse>) -> Option<&'static str> {
        result
            .unwrap_err()
            .downcast_ref::<SkygraphError>()
            .map(SkygraphError::classification)
    }

    #[test]
    fn test_octocat_week_scenario() {
        let raw = one_week(&[0, 1, 0, 2, 0, 0, 1], &[0, 1, 0, 3, 0, 0, 2]);
        let graph = parse_grid(raw).unwrap();

        assert_eq!(graph.weeks.len(), 1);
        assert_eq!(graph.weeks[0].days.len(), 7);
        assert_eq!(graph.lowest, 0);
        assert_eq!(graph.highest, 3);
        let counts: Vec<u32> = graph.weeks[0].days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 3, 0, 0, 2]);
        let levels: Vec<u32> = graph.weeks[0].days.iter().map(|d| d.level).collect();
        assert_eq!(levels, vec![0, 1, 0, 2, 0, 0, 1]);
    }

    #[test]
    fn test_missing_container_is_markup_not_found() {
        let raw = RawGrid {
            found: false,
            weeks: vec![],
        };
        assert_eq!(classification_of(parse_grid(raw)), Some("MarkupNotFoundError"));
    }

    #[test]
    fn test_non_numeric_count_is_parse_error_not_zero() {
        let raw = RawGrid {
            found: true,
            weeks: vec![RawWeek {
                days: vec![cell("2023-10-01", "1", "lots")],
            }],
        };
        assert_eq!(classification_of(parse_grid(raw)), Some("ParseError"));
    }

    #[test]
    fn test_missing_attribute_is_parse_error() {
        // The in-page script maps an absent data attribute to "".
        let raw = RawGrid {
            found: true,
            weeks: vec![RawWeek {
                days: vec![cell("2023-10-01", "", "4")],
            }],
        };
        assert_eq!(classification_of(parse_grid(raw)), Some("ParseError"));
    }

    #[test]
    fn test_negative_count_is_parse_error() {
        let raw = RawGrid {
            found: true,
            weeks: vec![RawWeek {
                days: vec![cell("2023-10-01", "1", "-3")],
            }],
        };
        assert_eq!(classification_of(parse_grid(raw)), Some("ParseError"));
    }

    #[test]
    fn test_all_zero_counts_rest_at_zero() {
        let raw = one_week(&[0; 7], &[0; 7]);
        let graph = parse_grid(raw).unwrap();
        assert_eq!(graph.lowest, 0);
        assert_eq!(graph.highest, 0);
    }

    #[test]
    fn test_lowest_rests_at_zero_even_without_zero_days() {
        // Running minimum starts at 0 and non-negative counts never
        // undercut it; the renderer depends on this exact value.
        let raw = one_week(&[1, 2, 3, 4, 4, 3, 2], &[5, 8, 13, 21, 21, 13, 8]);
        let graph = parse_grid(raw).unwrap();
        assert_eq!(graph.lowest, 0);
        assert_eq!(graph.highest, 21);
    }

    #[test]
    fn test_extremes_span_weeks() {
        let raw = RawGrid {
            found: true,
            weeks: vec![
                RawWeek {
                    days: vec![cell("2023-10-01", "1", "2")],
                },
                RawWeek {
                    days: vec![cell("2023-10-08", "4", "17")],
                },
            ],
        };
        let graph = parse_grid(raw).unwrap();
        assert_eq!(graph.highest, 17);
        assert_eq!(graph.lowest, 0);
    }

    #[test]
    fn test_document_order_is_preserved() {
        let raw = RawGrid {
            found: true,
            weeks: vec![
                RawWeek {
                    days: vec![cell("2023-10-01", "0", "0"), cell("2023-10-02", "1", "9")],
                },
                RawWeek {
                    days: vec![cell("2023-10-08", "2", "4")],
                },
            ],
        };
        let graph = parse_grid(raw).unwrap();
        assert_eq!(graph.weeks[0].days[0].date, "2023-10-01");
        assert_eq!(graph.weeks[0].days[1].date, "2023-10-02");
        assert_eq!(graph.weeks[1].days[0].date, "2023-10-08");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let make = || one_week(&[0, 1, 0, 2, 0, 0, 1], &[0, 1, 0, 3, 0, 0, 2]);
        let first = serde_json::to_string(&parse_grid(make()).unwrap()).unwrap();
        let second = serde_json::to_string(&parse_grid(make()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_raw_grid_deserializes_from_script_shape() {
        let payload = r#"{
            "found": true,
            "weeks": [
                { "days": [ { "date": "2023-10-01", "level": "1", "count": "3" } ] }
            ]
        }"#;
        let raw: RawGrid = serde_json::from_str(payload).unwrap();
        let graph = parse_grid(raw).unwrap();
        assert_eq!(graph.weeks[0].days[0].count, 3);
        assert_eq!(graph.highest, 3);
    }

    #[test]
    fn test_script_targets_the_calendar_container() {
        assert!(EXTRACT_SCRIPT.contains(".js-calendar-graph svg g"));
        assert!(EXTRACT_SCRIPT.contains("dataset.count"));
        assert!(EXTRACT_SCRIPT.contains("dataset.level"));
        assert!(EXTRACT_SCRIPT.contains("dataset.date"));
    }
}
