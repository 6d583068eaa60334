//! Encoding-space sweeps.
//!
//! Every word in a range is decoded, disassembled and lifted into a scratch
//! block, and the block must pass IR validation. Words are processed in
//! parallel; the report is independent of scheduling.

use std::collections::BTreeMap;

use alift_ir::{BasicBlock, MalformedIr};
use alift_isa::{InstrWord, Lifter};
use rayon::prelude::*;
use tracing::debug;

/// Words with these bits clear are kept as disassembly samples.
pub const SAMPLE_MASK: u32 = 0x00FF_FFFF;

/// Inclusive word range walked with a fixed stride.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl SweepRange {
    /// The whole encoding space.
    pub const FULL: Self = Self {
        start: 0,
        end: u32::MAX,
        step: 1,
    };

    #[must_use]
    pub const fn new(start: u32, end: u32, step: u32) -> Self {
        Self { start, end, step }
    }

    /// Number of words visited. A zero step is treated as one.
    #[must_use]
    pub fn len(&self) -> u64 {
        let step = self.step.max(1);
        self.end
            .checked_sub(self.start)
            .map_or(0, |span| u64::from(span / step) + 1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn word(&self, index: u64) -> Option<u32> {
        let offset = index.checked_mul(u64::from(self.step.max(1)))?;
        u32::try_from(u64::from(self.start) + offset).ok()
    }
}

/// Counts collected over one sweep.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Words visited.
    pub words: u64,
    /// Words that decoded to a known instruction.
    pub recognized: u64,
    /// Words per instruction class.
    pub classes: BTreeMap<&'static str, u64>,
    /// `(word, disassembly)` for words matching [`SAMPLE_MASK`], ascending.
    pub samples: Vec<(u32, String)>,
    /// Words whose lifted IR failed validation, ascending.
    pub malformed: Vec<(u32, MalformedIr)>,
}

impl SweepReport {
    /// Whether every visited word lifted to well-formed IR.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }

    fn record(mut self, lifter: &Lifter<'_>, raw: u32) -> Self {
        let instr = lifter.decode(InstrWord::new(0, raw));
        let text = lifter.disasm(&instr);
        let mut block = BasicBlock::new(0);
        lifter.lift(&instr, &mut block);
        if let Err(err) = block.validate(block.len()) {
            self.malformed.push((raw, err));
        }

        self.words += 1;
        if instr.instr.is_recognized() {
            self.recognized += 1;
        }
        *self.classes.entry(instr.instr.class()).or_default() += 1;
        if raw & SAMPLE_MASK == 0 {
            self.samples.push((raw, text));
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.words += other.words;
        self.recognized += other.recognized;
        for (class, count) in other.classes {
            *self.classes.entry(class).or_default() += count;
        }
        self.samples.extend(other.samples);
        self.malformed.extend(other.malformed);
        self
    }
}

/// Run every word of `range` through `lifter`.
pub fn sweep(lifter: &Lifter<'_>, range: SweepRange) -> SweepReport {
    let mut report = (0..range.len())
        .into_par_iter()
        .filter_map(|index| range.word(index))
        .fold(SweepReport::default, |report, raw| report.record(lifter, raw))
        .reduce(SweepReport::default, SweepReport::merge);

    report.samples.sort_unstable_by_key(|(raw, _)| *raw);
    report.malformed.sort_unstable_by_key(|(raw, _)| *raw);
    debug!(
        words = report.words,
        recognized = report.recognized,
        malformed = report.malformed.len(),
        "sweep finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len() {
        assert_eq!(SweepRange::FULL.len(), 1 << 32);
        assert_eq!(SweepRange::new(0, 9, 3).len(), 4);
        assert_eq!(SweepRange::new(10, 10, 1).len(), 1);
        assert_eq!(SweepRange::new(0, 9, 0).len(), 10);
        assert!(SweepRange::new(5, 4, 1).is_empty());
        assert_eq!(SweepRange::new(u32::MAX - 1, u32::MAX, 4).word(0), Some(u32::MAX - 1));
    }

    #[test]
    fn test_sweep_system_space() {
        // HINT space: d503201f | CRm:op2 << 5
        let range = SweepRange::new(0xD503_201F, 0xD503_2FFF, 1 << 5);
        let report = sweep(&Lifter::standard(), range);
        assert_eq!(report.words, 128);
        assert_eq!(report.recognized, 128);
        assert_eq!(report.classes.get("hint"), Some(&128));
        assert!(report.is_clean());
        assert!(report.samples.is_empty());
    }

    #[test]
    fn test_sweep_samples_and_totals() {
        let range = SweepRange::new(0, 0x0400_0000, 0x0010_0000);
        let report = sweep(&Lifter::standard(), range);
        assert_eq!(report.words, 65);
        assert_eq!(report.classes.values().sum::<u64>(), report.words);
        let sampled: Vec<u32> = report.samples.iter().map(|(raw, _)| *raw).collect();
        assert_eq!(
            sampled,
            [0, 0x0100_0000, 0x0200_0000, 0x0300_0000, 0x0400_0000]
        );
        assert!(report.is_clean());
    }

    #[test]
    fn test_sweep_matches_sequential() {
        let lifter = Lifter::standard();
        let range = SweepRange::new(0xD400_0000, 0xD400_FFFF, 7);
        let parallel = sweep(&lifter, range);
        let sequential = (0..range.len())
            .filter_map(|index| range.word(index))
            .fold(SweepReport::default(), |report, raw| report.record(&lifter, raw));
        assert_eq!(parallel, sequential);
    }
}
