use super::cue::Cue;

/// An ordered sequence of cues, sorted ascending by fire time.
///
/// The scheduler walks a sheet linearly and never sorts it, so sortedness
/// is validated here, at construction and on every append, instead of being
/// assumed. End markers may appear anywhere; ordering is only checked
/// between cues with finite times.
#[derive(Debug, Clone)]
pub struct CueSheet<T> {
    cues: Vec<Cue<T>>,
}

impl<T> CueSheet<T> {
    /// Empty sheet. Cues can be appended during playback; the poll loop
    /// re-arms forever precisely so late additions are picked up.
    pub fn new() -> Self {
        Self { cues: Vec::new() }
    }

    pub fn builder() -> CueSheetBuilder<T> {
        CueSheetBuilder::new()
    }

    /// Validate and adopt an already-sorted vector of cues.
    pub fn from_sorted(cues: Vec<Cue<T>>) -> Result<Self, CueSheetError> {
        let mut prev: Option<f64> = None;
        for (index, cue) in cues.iter().enumerate() {
            if let Some(time) = cue.time.finite() {
                if time < 0.0 {
                    return Err(CueSheetError::NegativeTime { index, time });
                }
                if let Some(p) = prev {
                    if time < p {
                        return Err(CueSheetError::OutOfOrder {
                            index,
                            prev: p,
                            next: time,
                        });
                    }
                }
                prev = Some(time);
            }
        }
        Ok(Self { cues })
    }

    /// Append one cue, keeping the sheet sorted.
    pub fn push(&mut self, cue: Cue<T>) -> Result<(), CueSheetError> {
        let index = self.cues.len();
        if let Some(time) = cue.time.finite() {
            if time < 0.0 {
                return Err(CueSheetError::NegativeTime { index, time });
            }
            if let Some(prev) = self.last_finite_time() {
                if time < prev {
                    return Err(CueSheetError::OutOfOrder {
                        index,
                        prev,
                        next: time,
                    });
                }
            }
        }
        self.cues.push(cue);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Cue<T>> {
        self.cues.get(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue<T>> {
        self.cues.iter()
    }

    /// Fire time of the latest finite cue, if any.
    pub fn last_finite_time(&self) -> Option<f64> {
        self.cues.iter().rev().find_map(|c| c.time.finite())
    }

    /// Fire time of the final finite cue - the nominal span of the sheet.
    pub fn span(&self) -> f64 {
        self.last_finite_time().unwrap_or(0.0)
    }
}

impl<T> Default for CueSheet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder for cue sheets.
///
/// `at` places a cue at an absolute time, `then` places one relative to the
/// previous cue. Ordering is validated once, at `build`.
pub struct CueSheetBuilder<T> {
    cues: Vec<Cue<T>>,
    /// Time of the most recent finite cue, for `then`.
    cursor_secs: f64,
}

impl<T> CueSheetBuilder<T> {
    fn new() -> Self {
        Self {
            cues: Vec::new(),
            cursor_secs: 0.0,
        }
    }

    /// Place a cue at `secs` from the start of playback.
    pub fn at(mut self, secs: f64, payload: T) -> Self {
        self.cues.push(Cue::at(secs, payload));
        if secs.is_finite() {
            self.cursor_secs = secs;
        }
        self
    }

    /// Place a cue `gap_secs` after the previous one.
    pub fn then(self, gap_secs: f64, payload: T) -> Self {
        let at = self.cursor_secs + gap_secs;
        self.at(at, payload)
    }

    /// Place an end-of-schedule marker. Later cues become unreachable.
    pub fn end_marker(mut self, payload: T) -> Self {
        self.cues.push(Cue::end_marker(payload));
        self
    }

    pub fn build(self) -> Result<CueSheet<T>, CueSheetError> {
        CueSheet::from_sorted(self.cues)
    }
}

/// Construction-time cue sheet errors.
///
/// Playback itself has no error channel; everything that can be rejected is
/// rejected here, before a sheet reaches the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CueSheetError {
    /// A finite cue fires earlier than the one before it.
    OutOfOrder { index: usize, prev: f64, next: f64 },
    /// A finite cue has a negative fire time.
    NegativeTime { index: usize, time: f64 },
}

impl std::fmt::Display for CueSheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueSheetError::OutOfOrder { index, prev, next } => {
                write!(
                    f,
                    "Cue {} out of order: fires at {}s but the previous cue fires at {}s",
                    index, next, prev
                )
            }
            CueSheetError::NegativeTime { index, time } => {
                write!(f, "Cue {} has negative fire time {}s", index, time)
            }
        }
    }
}

impl std::error::Error for CueSheetError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::CueTime;

    #[test]
    fn test_builder_basic() {
        let sheet = CueSheet::builder()
            .at(0.0, "one")
            .at(0.5, "two")
            .at(0.5, "two-and-a-half") // equal times are fine
            .at(1.0, "three")
            .build()
            .unwrap();

        assert_eq!(sheet.len(), 4);
        assert_eq!(sheet.get(0).unwrap().payload, "one");
        assert_eq!(sheet.span(), 1.0);
    }

    #[test]
    fn test_builder_then_is_relative() {
        let sheet = CueSheet::builder()
            .at(0.25, 'a')
            .then(0.25, 'b') // 0.5
            .then(0.5, 'c') // 1.0
            .build()
            .unwrap();

        assert_eq!(sheet.get(1).unwrap().time, CueTime::At(0.5));
        assert_eq!(sheet.get(2).unwrap().time, CueTime::At(1.0));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let result = CueSheet::builder().at(1.0, ()).at(0.5, ()).build();
        assert!(matches!(
            result,
            Err(CueSheetError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_time_rejected() {
        let result = CueSheet::from_sorted(vec![Cue::at(-0.1, ())]);
        assert!(matches!(
            result,
            Err(CueSheetError::NegativeTime { index: 0, .. })
        ));
    }

    #[test]
    fn test_end_marker_does_not_break_ordering() {
        // Markers carry no finite time, so ordering skips over them.
        let sheet = CueSheet::builder()
            .at(0.0, 0u8)
            .end_marker(0)
            .at(1.0, 0)
            .build()
            .unwrap();

        assert_eq!(sheet.len(), 3);
        assert!(sheet.get(1).unwrap().time.is_end_marker());
    }

    #[test]
    fn test_push_validates_against_last_finite() {
        let mut sheet = CueSheet::builder().at(1.0, ()).build().unwrap();

        assert!(sheet.push(Cue::at(2.0, ())).is_ok());
        assert!(matches!(
            sheet.push(Cue::at(1.5, ())),
            Err(CueSheetError::OutOfOrder { .. })
        ));
        // The failed push leaves the sheet untouched.
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_non_finite_at_allowed_as_marker() {
        // NaN is not an ordering violation - it is an end marker.
        let sheet = CueSheet::from_sorted(vec![
            Cue::at(0.0, ()),
            Cue::at(f64::NAN, ()),
            Cue::at(1.0, ()),
        ])
        .unwrap();
        assert!(sheet.get(1).unwrap().time.is_end_marker());
    }
}
