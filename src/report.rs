use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::cli::{DatasetArgs, RangeArgs, SceneArgs, TableArgs, TableFormat};
use crate::config::DatasetSpec;
use crate::dashboard::{Dashboard, ViewState};
use crate::dataset;
use crate::filter::PageRange;
use crate::formats::{SegmentKey, TableRow};
use crate::selection::Selection;

pub fn scene(args: SceneArgs) -> anyhow::Result<()> {
    let dashboard = open_dashboard(&args.dataset, &args.range, Selection::Unselected)?;
    let scene = dashboard.scene();
    tracing::info!(title = scene.title(), "built scene");

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &scene).context("serialize scene")?;
    out.write_all(b"\n").context("write scene newline")?;
    out.flush().context("flush scene")?;
    Ok(())
}

pub fn table(args: TableArgs) -> anyhow::Result<()> {
    let selection = match (&args.month, &args.rating) {
        (Some(month), Some(rating)) => {
            Selection::Selected(SegmentKey::new(
                month.parse().context("parse --month")?,
                rating.parse().context("parse --rating")?,
            ))
        }
        _ => Selection::Unselected,
    };

    let dashboard = open_dashboard(&args.dataset, &args.range, selection)?;
    let rows = dashboard.table();
    tracing::info!(rows = rows.len(), "built table");

    let out = std::io::stdout().lock();
    match args.format {
        TableFormat::Json => write_json(out, &rows),
        TableFormat::Csv => write_csv(out, &rows),
    }
}

fn open_dashboard(
    source: &DatasetArgs,
    range: &RangeArgs,
    selection: Selection,
) -> anyhow::Result<Dashboard> {
    let spec = DatasetSpec::new(source.year, &source.shelves)?;
    let dataset = dataset::load(Path::new(&source.input), &spec)?;
    let bounds = dataset.page_bounds().unwrap_or(PageRange::new(0, 0));
    let page_range = PageRange::new(
        range.low.unwrap_or(bounds.low),
        range.high.unwrap_or(bounds.high),
    );

    Ok(Dashboard::new(Arc::new(dataset)).with_state(ViewState {
        page_range,
        selection,
    }))
}

fn write_json<W: std::io::Write>(mut out: W, rows: &[TableRow]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, rows).context("serialize table")?;
    out.write_all(b"\n").context("write table newline")?;
    out.flush().context("flush table")?;
    Ok(())
}

fn write_csv<W: std::io::Write>(out: W, rows: &[TableRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["Month Read", "Title", "Author", "My Rating", "Pages"])
        .context("write table header")?;
    for row in rows {
        let month = row.month.map(|m| m.to_string()).unwrap_or_default();
        let rating = row.rating.map(|r| r.to_string()).unwrap_or_default();
        let pages = row.pages.to_string();
        writer
            .write_record([
                month.as_str(),
                row.title.as_str(),
                row.author.as_str(),
                rating.as_str(),
                pages.as_str(),
            ])
            .context("write table row")?;
    }
    writer.flush().context("flush table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_leaves_unrated_blank() -> anyhow::Result<()> {
        let rows = vec![
            TableRow {
                month: Some("2025-01".parse()?),
                title: "Dune".to_owned(),
                author: "Herbert".to_owned(),
                rating: Some(5.0),
                pages: 412,
            },
            TableRow {
                month: Some("2025-02".parse()?),
                title: "Emma, Vol. 1".to_owned(),
                author: "Austen".to_owned(),
                rating: None,
                pages: 474,
            },
        ];
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows)?;
        let text = String::from_utf8(buf)?;
        assert_eq!(
            text,
            "Month Read,Title,Author,My Rating,Pages\n\
             2025-01,Dune,Herbert,5,412\n\
             2025-02,\"Emma, Vol. 1\",Austen,,474\n"
        );
        Ok(())
    }
}
