//! Row creation and hierarchical linking.
//!
//! Each creation runs as one pass: resolve the parent period first, create
//! the row, then set the date range and the parent relation as separate
//! property writes. There is no rollback; if a write after creation fails
//! the row stays behind unlinked. Nothing here deduplicates either, running
//! a trigger twice on the same date creates two rows.

use chrono::NaiveDate;
use tracing::info;

use crate::models::RowHandle;
use crate::notion::{PropertyValue, WorkspaceClient};
use crate::{periods, Config, Result};

/// Date property on Week and Month rows.
pub const DATES_PROPERTY: &str = "Dates";
/// Relation from a Week row to its Month row.
pub const MONTH_PROPERTY: &str = "Month";
/// Relation from a Month row to its Year row.
pub const YEAR_PROPERTY: &str = "Year";
/// Relation from an arbitrary row to today's Day row.
pub const DAY_PROPERTY: &str = "Day";

/// Title of a Day row: `DD.MM.YYYY`.
pub fn day_title(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Title of a Week row: `DD.MM. - DD.MM.YYYY` over the week window.
pub fn week_title(start: NaiveDate) -> String {
    let range = periods::week_bounds(start);
    format!(
        "{} - {}",
        range.start.format("%d.%m."),
        range.end.format("%d.%m.%Y")
    )
}

/// Title of a Month row: the English month name.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Create today's Day row, titled `DD.MM.YYYY`.
///
/// No range and no link are set here; linking a day to its week happens
/// lazily when content is filed against it.
pub async fn create_day(
    client: &impl WorkspaceClient,
    config: &Config,
    today: NaiveDate,
) -> Result<RowHandle> {
    let title = day_title(today);
    let row = client.create_row(&config.day_page, &title).await?;
    info!(row_id = %row.id, %title, "created day row");
    Ok(row)
}

/// Create this week's row, titled `DD.MM. - DD.MM.YYYY`, spanning the
/// invocation date plus five days, linked to the containing Month row.
///
/// Fails when no Month row covers `today`; the Month row must exist first.
pub async fn create_week(
    client: &impl WorkspaceClient,
    config: &Config,
    today: NaiveDate,
) -> Result<RowHandle> {
    let range = periods::week_bounds(today);
    let title = week_title(today);

    let months = client.get_rows(&config.month_page).await?;
    let month = periods::find_containing(&months, today)?;

    let row = client.create_row(&config.week_page, &title).await?;
    client
        .set_property(&row.id, DATES_PROPERTY, PropertyValue::Date(range))
        .await?;
    client
        .set_property(
            &row.id,
            MONTH_PROPERTY,
            PropertyValue::Relation(month.id.clone()),
        )
        .await?;

    info!(row_id = %row.id, %title, month_id = %month.id, "created week row");
    Ok(row)
}

/// Create this month's row, titled with the English month name, spanning the
/// full calendar month, linked to the containing Year row.
///
/// Fails when no Year row covers `today`; the Year row must exist first.
pub async fn create_month(
    client: &impl WorkspaceClient,
    config: &Config,
    today: NaiveDate,
) -> Result<RowHandle> {
    let range = periods::month_bounds(today);
    let title = month_title(today);

    let years = client.get_rows(&config.year_page).await?;
    let year = periods::find_containing(&years, today)?;

    let row = client.create_row(&config.month_page, &title).await?;
    client
        .set_property(&row.id, DATES_PROPERTY, PropertyValue::Date(range))
        .await?;
    client
        .set_property(
            &row.id,
            YEAR_PROPERTY,
            PropertyValue::Relation(year.id.clone()),
        )
        .await?;

    info!(row_id = %row.id, %title, year_id = %year.id, "created month row");
    Ok(row)
}
