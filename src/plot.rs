//! Trace waveform plotting, available with the `charts` feature.

use crate::models::MeasurementBlocks;
use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;

/// Plot the sampled backscatter waveform to a PNG file.
///
/// Sample distances get the same calibration factor as event distances so
/// the chart lines up with the event table.
pub fn plot_trace<P: AsRef<Path>>(
    blocks: &MeasurementBlocks,
    distance_factor: f64,
    output_path: P,
) -> Result<()> {
    let points = blocks
        .data_pts
        .as_ref()
        .map(|dp| dp.data_points.as_slice())
        .unwrap_or(&[]);

    if points.is_empty() {
        bail!("no waveform samples to plot (DataPts block missing or empty)");
    }

    let xs: Vec<f64> = points.iter().map(|p| p.0 * distance_factor).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

    let x_min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(output_path.as_ref(), (1280, 720)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("OTDR Trace", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Level (dB)")
        .draw()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    chart
        .draw_series(LineSeries::new(
            xs.iter().cloned().zip(ys.iter().cloned()),
            &BLUE,
        ))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    root.present().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataPts;
    use tempfile::TempDir;

    #[test]
    fn test_plot_trace_writes_png() {
        let blocks = MeasurementBlocks {
            key_events: None,
            data_pts: Some(DataPts {
                data_points: (0..200).map(|i| (i as f64 * 4.0, -3.0 - i as f64 * 0.01)).collect(),
            }),
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.png");
        plot_trace(&blocks, 0.5, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_plot_trace_without_samples_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.png");
        let err = plot_trace(&MeasurementBlocks::default(), 0.5, &path).unwrap_err();
        assert!(err.to_string().contains("no waveform samples"));
    }
}
