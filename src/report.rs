use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use itertools::Itertools;
use plotters::prelude::*;

use crate::config::DecimalSeparator;
use crate::error::{LoopDiffError, Result};
use crate::record::TestedLoop;

/// Threshold for the plot's reference line (in `padj` space) and for point
/// labelling (in raw `pval` space -- the asymmetry is inherited from the
/// original tool and kept as-is).
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Fixed visible range of the volcano plot's y axis.
const Y_AXIS_MAX: f64 = 2.5;

pub const TABLE_FILENAME: &str = "output_loopstrength.txt";
pub const PLOT_FILENAME: &str = "volcano_plot.svg";

/// Undefined p-values serialize as this marker.
const NA_MARKER: &str = "NA";

/// Writes the results table and the volcano plot into `output_dir`, creating
/// the directory if absent. Re-running silently replaces prior outputs.
///
/// The two writes are independent; if both fail, both causes surface in the
/// returned error.
pub fn write_report(
    loops: &[TestedLoop],
    output_dir: &Path,
    separator: DecimalSeparator,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir).map_err(|source| LoopDiffError::OutputIo {
        path: output_dir.to_path_buf(),
        detail: source.to_string(),
    })?;

    let table = write_table(loops, output_dir, separator);
    let plot = write_volcano(loops, output_dir);
    match (table, plot) {
        (Ok(table_path), Ok(plot_path)) => Ok((table_path, plot_path)),
        (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
        (Err(table_err), Err(plot_err)) => Err(LoopDiffError::OutputIo {
            path: output_dir.to_path_buf(),
            detail: format!("{table_err}; {plot_err}"),
        }),
    }
}

/// Writes the tab-delimited results table: the nine input columns plus
/// `loop_size`, `logFC`, `pval` and `padj`, one row per sample loop, in the
/// order the sample set currently holds.
fn write_table(
    loops: &[TestedLoop],
    output_dir: &Path,
    separator: DecimalSeparator,
) -> Result<PathBuf> {
    let path = output_dir.join(TABLE_FILENAME);
    let output_io = |detail: String| LoopDiffError::OutputIo {
        path: path.clone(),
        detail,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
        .map_err(|e| output_io(e.to_string()))?;
    writer
        .write_record([
            "chrA",
            "startA",
            "endA",
            "chrB",
            "startB",
            "endB",
            "loop_id",
            "strength_control",
            "strength_mutant",
            "loop_size",
            "logFC",
            "pval",
            "padj",
        ])
        .map_err(|e| output_io(e.to_string()))?;

    for tested in loops {
        let r = &tested.record;
        writer
            .write_record([
                r.chr_a.clone(),
                r.start_a.to_string(),
                r.end_a.to_string(),
                r.chr_b.clone(),
                r.start_b.to_string(),
                r.end_b.to_string(),
                r.loop_id.clone(),
                fmt_float(r.strength_control, separator),
                fmt_float(r.strength_mutant, separator),
                r.loop_size.to_string(),
                fmt_float(tested.logfc, separator),
                fmt_pvalue(tested.pval, separator),
                fmt_pvalue(tested.padj, separator),
            ])
            .map_err(|e| output_io(e.to_string()))?;
    }
    writer.flush().map_err(|e| output_io(e.to_string()))?;
    Ok(path)
}

fn fmt_float(value: f64, separator: DecimalSeparator) -> String {
    let text = value.to_string();
    match separator {
        DecimalSeparator::Comma => text.replace('.', ","),
        DecimalSeparator::Period => text,
    }
}

fn fmt_pvalue(value: Option<f64>, separator: DecimalSeparator) -> String {
    match value {
        Some(v) => fmt_float(v, separator),
        None => NA_MARKER.to_string(),
    }
}

fn write_volcano(loops: &[TestedLoop], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(PLOT_FILENAME);
    draw_volcano(loops, &path).map_err(|e| LoopDiffError::OutputIo {
        path: path.clone(),
        detail: format!("{e:#}"),
    })?;
    Ok(path)
}

/// Scatter of `logFC` against `-log10(padj)` with a dashed reference line at
/// `-log10(0.05)`. Loops with an undefined `padj` have no y coordinate and
/// are left off the plot; points above the fixed y range are clipped away,
/// matching the original tool's axis limits.
fn draw_volcano(loops: &[TestedLoop], path: &Path) -> anyhow::Result<()> {
    let points = loops
        .iter()
        .filter_map(|l| l.padj.map(|padj| (l.logfc, -padj.log10(), l)))
        .collect_vec();

    let (x_min, x_max) = match points.iter().map(|p| p.0).minmax().into_option() {
        Some((lo, hi)) => {
            let pad = ((hi - lo) * 0.1).max(0.25);
            (lo - pad, hi + pad)
        }
        None => (-1.0, 1.0),
    };

    let root = SVGBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).context("filling plot background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Differential loop strength", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..Y_AXIS_MAX)
        .context("building chart axes")?;
    chart
        .configure_mesh()
        .x_desc("log2 fold change")
        .y_desc("-log10(padj)")
        .draw()
        .context("drawing chart mesh")?;

    let cutoff = -SIGNIFICANCE_THRESHOLD.log10();
    chart
        .draw_series(DashedLineSeries::new(
            [(x_min, cutoff), (x_max, cutoff)],
            8,
            4,
            BLACK.stroke_width(1),
        ))
        .context("drawing significance line")?;

    for (x, y, tested) in &points {
        if !y.is_finite() || *y > Y_AXIS_MAX {
            continue;
        }
        chart
            .draw_series(std::iter::once(Circle::new((*x, *y), 3, BLUE.filled())))
            .context("drawing loop point")?;
        let labelled = tested.pval.is_some_and(|pval| pval < SIGNIFICANCE_THRESHOLD);
        if labelled {
            chart
                .draw_series(std::iter::once(Text::new(
                    tested.record.loop_id.clone(),
                    (*x, *y + (Y_AXIS_MAX * 0.02)),
                    ("sans-serif", 14).into_font(),
                )))
                .context("labelling significant loop")?;
        }
    }

    root.present().context("writing plot file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::record::{LoopRecord, RawLoop};

    fn tested(loop_id: &str, pval: Option<f64>, padj: Option<f64>) -> TestedLoop {
        let record = LoopRecord::from(RawLoop {
            chr_a: "chr1".to_string(),
            start_a: 1_000_000,
            end_a: 1_005_000,
            chr_b: "chr1".to_string(),
            start_b: 2_500_000,
            end_b: 2_505_000,
            loop_id: loop_id.to_string(),
            strength_control: 10.0,
            strength_mutant: 25.0,
        });
        TestedLoop::builder()
            .record(record)
            .logfc(0.5)
            .maybe_pval(pval)
            .maybe_padj(padj)
            .build()
    }

    #[test]
    fn test_table_header_and_comma_decimals() {
        let dir = TempDir::new().unwrap();
        let loops = vec![tested("loop_1", Some(0.25), Some(0.5))];
        let (table_path, _) =
            write_report(&loops, dir.path(), DecimalSeparator::Comma).unwrap();
        let text = fs::read_to_string(table_path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "chrA\tstartA\tendA\tchrB\tstartB\tendB\tloop_id\tstrength_control\tstrength_mutant\tloop_size\tlogFC\tpval\tpadj"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\t0,25\t"));
        assert!(row.ends_with("\t0,5"));
    }

    #[test]
    fn test_period_separator_keeps_points() {
        let dir = TempDir::new().unwrap();
        let loops = vec![tested("loop_1", Some(0.25), Some(0.5))];
        let (table_path, _) =
            write_report(&loops, dir.path(), DecimalSeparator::Period).unwrap();
        let text = fs::read_to_string(table_path).unwrap();
        assert!(text.contains("\t0.25\t"));
        assert!(!text.contains(','));
    }

    #[test]
    fn test_undefined_pvalues_serialize_as_na() {
        let dir = TempDir::new().unwrap();
        let loops = vec![tested("loop_1", None, None)];
        let (table_path, _) =
            write_report(&loops, dir.path(), DecimalSeparator::Comma).unwrap();
        let text = fs::read_to_string(table_path).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with("\tNA\tNA"));
    }

    #[test]
    fn test_rerun_into_existing_directory() {
        let dir = TempDir::new().unwrap();
        let loops = vec![tested("loop_1", Some(0.25), Some(0.5))];
        let (first, _) = write_report(&loops, dir.path(), DecimalSeparator::Comma).unwrap();
        let first_bytes = fs::read(&first).unwrap();
        let (second, _) = write_report(&loops, dir.path(), DecimalSeparator::Comma).unwrap();
        assert_eq!(first_bytes, fs::read(&second).unwrap());
    }

    #[test]
    fn test_plot_written_for_empty_sample() {
        let dir = TempDir::new().unwrap();
        let (_, plot_path) = write_report(&[], dir.path(), DecimalSeparator::Comma).unwrap();
        assert!(plot_path.exists());
        assert!(fs::metadata(&plot_path).unwrap().len() > 0);
    }

    #[test]
    fn test_unwritable_directory_is_output_io() {
        let err = write_report(
            &[],
            Path::new("/proc/no_such_dir/out"),
            DecimalSeparator::Comma,
        )
        .unwrap_err();
        assert!(matches!(err, LoopDiffError::OutputIo { .. }));
    }
}
