//! Lifting pipeline - bytes → decode → lift → optimize → serialize.

use alift_ir::{BasicBlock, Function, SerializeOptions, serialize_function};
use alift_isa::{INSTR_SIZE, Lifter, WordReader};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{Error, Result};

/// Lifting configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiftConfig {
    /// Address of the first instruction.
    pub base: u64,
    /// Run the peephole optimizer after lifting.
    pub optimize: bool,
    /// Serializer options for text output.
    pub serialize: SerializeOptions,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            base: 0,
            optimize: true,
            serialize: SerializeOptions::default(),
        }
    }
}

impl LiftConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub const fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    #[must_use]
    pub fn with_serialize_options(mut self, options: SerializeOptions) -> Self {
        self.serialize = options;
        self
    }
}

/// Lifting pipeline.
pub struct Pipeline<'t> {
    config: LiftConfig,
    lifter: Lifter<'t>,
}

impl Pipeline<'static> {
    /// Create a pipeline over the standard decoder and tables.
    #[must_use]
    pub fn new(config: LiftConfig) -> Self {
        Self::with_lifter(config, Lifter::standard())
    }
}

impl<'t> Pipeline<'t> {
    /// Create a pipeline with a custom lifter.
    #[must_use]
    pub const fn with_lifter(config: LiftConfig, lifter: Lifter<'t>) -> Self {
        Self { config, lifter }
    }

    #[must_use]
    pub const fn config(&self) -> &LiftConfig {
        &self.config
    }

    #[must_use]
    pub const fn lifter(&self) -> &Lifter<'t> {
        &self.lifter
    }

    /// Lift a buffer of instruction words into a function.
    ///
    /// A new block starts after every terminator. The buffer must hold a
    /// positive whole number of words, and its last byte must not wrap past
    /// the top of the address space.
    pub fn lift_function(&self, bytes: &[u8]) -> Result<Function> {
        if bytes.is_empty() || bytes.len() % usize::from(INSTR_SIZE) != 0 {
            return Err(Error::TruncatedInput { len: bytes.len() });
        }

        let base = self.config.base;
        if u64::try_from(bytes.len())
            .ok()
            .and_then(|len| base.checked_add(len))
            .is_none()
        {
            return Err(Error::AddressOverflow {
                base,
                len: bytes.len(),
            });
        }
        let mut func = Function::new(base);
        let mut block = BasicBlock::new(base);
        for word in WordReader::new(bytes, base) {
            let instr = self.lifter.decode(word?);
            trace!(
                addr = instr.addr,
                raw = instr.raw,
                class = instr.instr.class(),
                "decoded"
            );
            self.lifter.lift(&instr, &mut block);
            if block.is_terminated() {
                let next = BasicBlock::new(block.end);
                func.blocks.push(std::mem::replace(&mut block, next));
            }
        }
        if block.size() > 0 {
            func.blocks.push(block);
        }

        debug_assert!(
            func.validate().is_ok(),
            "lifter produced malformed IR: {:?}",
            func.validate()
        );

        if self.config.optimize {
            alift_opt::optimize_function(&mut func);
        }
        debug!(
            blocks = func.blocks.len(),
            statements = func.stmt_count(),
            "lifted function"
        );
        Ok(func)
    }

    /// Serialize a function with the configured options.
    #[must_use]
    pub fn serialize(&self, func: &Function) -> String {
        serialize_function(func, &self.config.serialize)
    }

    /// Lift a buffer and serialize the result.
    pub fn lift_to_string(&self, bytes: &[u8]) -> Result<String> {
        self.lift_function(bytes).map(|func| self.serialize(&func))
    }

    /// Lift independent buffers in parallel.
    pub fn lift_batch<B>(&self, inputs: &[B]) -> Vec<Result<Function>>
    where
        B: AsRef<[u8]> + Sync,
    {
        inputs
            .par_iter()
            .map(|bytes| self.lift_function(bytes.as_ref()))
            .collect()
    }

    /// Disassemble a buffer, one line per word.
    ///
    /// A trailing partial word is reported as a read error.
    pub fn disassemble(&self, bytes: &[u8]) -> Result<Vec<String>> {
        WordReader::new(bytes, self.config.base)
            .map(|word| {
                let instr = self.lifter.decode(word?);
                Ok(format!(
                    "{:#010x}  {:08x}  {:<10} {}",
                    instr.addr,
                    instr.raw,
                    instr.instr.class(),
                    self.lifter.disasm(&instr)
                ))
            })
            .collect()
    }
}

impl Default for Pipeline<'static> {
    fn default() -> Self {
        Self::new(LiftConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alift_isa::ReadError;

    #[test]
    fn test_config_builders() {
        let config = LiftConfig::new()
            .with_base(0x4000)
            .with_optimize(false)
            .with_serialize_options(SerializeOptions::llil());
        assert_eq!(config.base, 0x4000);
        assert!(!config.optimize);
        assert_eq!(config.serialize.op_prefix, "LLIL_");
    }

    #[test]
    fn test_truncated_input() {
        let pipeline = Pipeline::default();
        for len in [0, 1, 2, 3, 5, 7] {
            let bytes = vec![0u8; len];
            assert!(matches!(
                pipeline.lift_function(&bytes),
                Err(Error::TruncatedInput { len: l }) if l == len
            ));
        }
    }

    #[test]
    fn test_blocks_split_after_terminators() {
        let pipeline = Pipeline::default();
        // svc #0; ret; nop
        let bytes = [
            0x01, 0x00, 0x00, 0xd4, 0xc0, 0x03, 0x5f, 0xd6, 0x1f, 0x20, 0x03, 0xd5,
        ];
        let func = pipeline.lift_function(&bytes).unwrap();
        assert_eq!(func.blocks.len(), 2);
        assert_eq!((func.blocks[0].start, func.blocks[0].end), (0, 8));
        assert_eq!((func.blocks[1].start, func.blocks[1].end), (8, 12));
    }

    #[test]
    fn test_base_address() {
        let pipeline = Pipeline::new(LiftConfig::new().with_base(0x1000));
        // b #8
        let text = pipeline.lift_to_string(&[0x02, 0x00, 0x00, 0x14]).unwrap();
        assert_eq!(text, "JUMP(CONST_PTR(4104))");
    }

    #[test]
    fn test_base_near_top_of_address_space() {
        let nop = [0x1f, 0x20, 0x03, 0xd5];
        let pipeline = Pipeline::new(LiftConfig::new().with_base(0xFFFF_FFFF_FFFF_FFFC));
        assert!(matches!(
            pipeline.lift_to_string(&nop),
            Err(Error::AddressOverflow {
                base: 0xFFFF_FFFF_FFFF_FFFC,
                len: 4
            })
        ));

        let pipeline = Pipeline::new(LiftConfig::new().with_base(0xFFFF_FFFF_FFFF_FFF8));
        let func = pipeline.lift_function(&nop).unwrap();
        assert_eq!(func.blocks[0].end, 0xFFFF_FFFF_FFFF_FFFC);
        assert_eq!(
            pipeline.lift_to_string(&nop).unwrap(),
            "INTRINSIC([],SystemHintOp_NOP,CALL_PARAM([]))"
        );
    }

    #[test]
    fn test_optimize_toggle() {
        // mov x0, x0; ret
        let bytes = [0xe0, 0x03, 0x00, 0xaa, 0xc0, 0x03, 0x5f, 0xd6];
        let optimized = Pipeline::default().lift_to_string(&bytes).unwrap();
        assert_eq!(optimized, "RET(REG(x30))");
        let raw = Pipeline::new(LiftConfig::new().with_optimize(false))
            .lift_to_string(&bytes)
            .unwrap();
        assert_eq!(raw, "SET_REG(x0,REG(x0)); RET(REG(x30))");
    }

    #[test]
    fn test_lift_batch_matches_sequential() {
        let pipeline = Pipeline::default();
        let inputs: Vec<Vec<u8>> = (0..32u32)
            .map(|n| (0xD400_0001 | (n << 5)).to_le_bytes().to_vec())
            .collect();
        let batch = pipeline.lift_batch(&inputs);
        for (input, result) in inputs.iter().zip(batch) {
            let expected = pipeline.lift_function(input).unwrap();
            assert_eq!(result.unwrap(), expected);
        }
    }

    #[test]
    fn test_disassemble() {
        let pipeline = Pipeline::default();
        let lines = pipeline
            .disassemble(&[0x1f, 0x20, 0x03, 0xd5, 0xc0, 0x03, 0x5f, 0xd6])
            .unwrap();
        assert_eq!(
            lines,
            [
                "0x00000000  d503201f  hint       nop",
                "0x00000004  d65f03c0  ret        ret",
            ]
        );
        assert!(matches!(
            pipeline.disassemble(&[0x1f, 0x20]),
            Err(Error::Read(ReadError::Truncated {
                addr: 0,
                remaining: 2
            }))
        ));
    }
}
