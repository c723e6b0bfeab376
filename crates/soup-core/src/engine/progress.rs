use std::fmt;

/// The stages of a structure load, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Parse,
    Classify,
    Bonding,
    SecondaryStructure,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Parse => "Parsing structure",
            Self::Classify => "Classifying residues",
            Self::Bonding => "Inferring bonds",
            Self::SecondaryStructure => "Assigning secondary structure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { phase: Phase },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PhaseFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::PhaseStart { phase } = event {
                events.lock().unwrap().push(phase);
            }
        }));
        reporter.report(Progress::PhaseStart {
            phase: Phase::Parse,
        });
        reporter.report(Progress::PhaseFinish);
        reporter.report(Progress::PhaseStart {
            phase: Phase::Bonding,
        });
        drop(reporter);

        assert_eq!(events.into_inner().unwrap(), vec![Phase::Parse, Phase::Bonding]);
    }
}
