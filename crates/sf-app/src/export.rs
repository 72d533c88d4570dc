//! CSV rendering of records, responses and sweeps.

use std::fmt::Write;

use sf_core::normalized;
use sf_motion::GroundMotionRecord;
use sf_results::TimeseriesRecord;

use crate::run_service::SimulationRun;
use crate::sweep::{SweepAxis, SweepPoint};

pub fn ground_motion_csv(record: &GroundMotionRecord) -> String {
    let mut csv = String::from("time_s,ground_accel_mps2\n");
    for (t, a) in record.time().iter().zip(record.acceleration()) {
        let _ = writeln!(csv, "{t},{a}");
    }
    csv
}

pub fn timeseries_csv(records: &[TimeseriesRecord]) -> String {
    let mut csv = String::from(
        "time_s,ground_accel_mps2,displacement_m,velocity_mps,accel_mps2,\
         kinetic_energy_j,potential_energy_j,total_energy_j\n",
    );
    for r in records {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{}",
            r.time_s,
            r.ground_accel_mps2,
            r.displacement_m,
            r.velocity_mps,
            r.accel_mps2,
            r.kinetic_energy_j,
            r.potential_energy_j,
            r.total_energy_j
        );
    }
    csv
}

/// Ground acceleration and displacement each scaled to unit peak, for
/// overlaying excitation and response on one axis.
pub fn normalized_overlay_csv(run: &SimulationRun) -> String {
    let ground = normalized(run.record.acceleration());
    let displacement = normalized(&run.response.displacement);

    let mut csv = String::from("time_s,ground_norm,displacement_norm\n");
    for ((t, g), x) in run.response.time.iter().zip(&ground).zip(&displacement) {
        let _ = writeln!(csv, "{t},{g},{x}");
    }
    csv
}

pub fn sweep_csv(axis: SweepAxis, points: &[SweepPoint]) -> String {
    let mut csv = format!(
        "{},damping_ratio,natural_period_s,pga_mps2,max_displacement_m,max_velocity_mps,\
         max_accel_mps2,max_total_energy_j,error\n",
        axis.label()
    );
    for point in points {
        match &point.outcome {
            Ok(s) => {
                let _ = writeln!(
                    csv,
                    "{},{},{},{},{},{},{},{},",
                    point.value,
                    s.descriptors.damping_ratio,
                    s.descriptors.natural_period_s,
                    s.pga,
                    s.peaks.displacement.value,
                    s.peaks.velocity.value,
                    s.peaks.acceleration.value,
                    s.peaks.total_energy.value
                );
            }
            Err(message) => {
                let _ = writeln!(
                    csv,
                    "{},,,,,,,,\"{}\"",
                    point.value,
                    message.replace('"', "'")
                );
            }
        }
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::TimeGrid;

    #[test]
    fn ground_motion_csv_has_one_row_per_sample() {
        let record = GroundMotionRecord::quiet(TimeGrid::new(0.05).unwrap());
        let csv = ground_motion_csv(&record);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "time_s,ground_accel_mps2");
        assert_eq!(lines[1], "0,0");
    }

    #[test]
    fn sweep_csv_reports_failures_inline() {
        let points = vec![SweepPoint {
            value: 0.0,
            outcome: Err("Invalid parameter: \"mass\"".to_string()),
        }];
        let csv = sweep_csv(SweepAxis::Mass, &points);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("0,,,,,,,,"));
        assert!(row.contains("'mass'"));
    }
}
