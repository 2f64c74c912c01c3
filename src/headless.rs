use eogcal_core::{Marker, Point};
use eogcal_sequencer::{CalibrationSequencer, SequencerEvent};
use eogcal_timing::Timer;
use log::{debug, info};
use std::time::Duration;

/// Stand-in display for runs without a window; logs what would be drawn.
#[derive(Debug, Default)]
pub struct LoggingMarker {
    position: Point,
    visible: bool,
}

impl Marker for LoggingMarker {
    fn set_position(&mut self, position: Point) {
        if self.visible {
            info!("marker moved to ({:.1}, {:.1})", position.0, position.1);
        }
        self.position = position;
    }

    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            info!(
                "marker {} at ({:.1}, {:.1})",
                if visible { "shown" } else { "hidden" },
                self.position.0,
                self.position.1
            );
        }
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct HeadlessReport {
    pub markers_shown: usize,
    pub completed: bool,
    pub took: Duration,
}

/// Runs one calibration to the end, ticking every `tick`.
pub fn run<T, M>(sequencer: &mut CalibrationSequencer<T, M>, tick: Duration) -> HeadlessReport
where
    T: Timer,
    M: Marker,
{
    let mut report = HeadlessReport::default();
    let started = sequencer.timer().now();
    sequencer.start_calibration();

    loop {
        for event in sequencer.update() {
            debug!("{event:?}");
            match event {
                SequencerEvent::Shown { .. } => report.markers_shown += 1,
                SequencerEvent::Completed => report.completed = true,
                _ => {}
            }
        }
        if !sequencer.is_running() {
            break;
        }
        sequencer.timer().sleep(tick);
    }

    report.took = sequencer.timer().elapsed(started);
    info!(
        "Headless run finished after {:.3} s, {} markers shown",
        report.took.as_secs_f64(),
        report.markers_shown
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use eogcal_core::TargetOrder;
    use eogcal_sequencer::SequencerConfig;
    use eogcal_timing::ManualTimer;

    #[test]
    fn canonical_run_shows_reference_between_targets() {
        let mut sequencer = CalibrationSequencer::new(
            SequencerConfig::default(),
            TargetOrder::canonical(),
            ManualTimer::new(),
            LoggingMarker::default(),
        )
        .with_display_size(1920.0, 1080.0);

        let report = run(&mut sequencer, Duration::from_millis(5));

        assert!(report.completed);
        // each target followed by the reference
        assert_eq!(report.markers_shown, 13 * 2);
        assert!(!sequencer.marker().is_visible());
        assert!(report.took >= Duration::from_millis(250 + 26 * 2250));
    }
}
