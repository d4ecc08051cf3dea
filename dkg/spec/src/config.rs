use crate::error::ConfigBuilderError;

/// Smallest deposit that activates a validator, in gwei
pub const MIN_ACTIVATION_BALANCE: u64 = 32_000_000_000;
/// Largest effective balance of a compounding validator, in gwei
pub const MAX_EFFECTIVE_BALANCE: u64 = 2_048_000_000_000;

// A 13 member committee tolerates 4 faults, larger committees cannot be encoded
const MAX_SUPPORTED_FAULTS: usize = 4;
const DEFAULT_MAX_BATCH_SIZE: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    max_faults: usize,
    max_batch_size: usize,
    min_deposit_amount: u64,
    max_deposit_amount: u64,
}

impl Config {
    /// The largest number of faulty operators a committee may be sized for
    pub fn max_faults(&self) -> usize {
        self.max_faults
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    pub fn min_deposit_amount(&self) -> u64 {
        self.min_deposit_amount
    }

    pub fn max_deposit_amount(&self) -> u64 {
        self.max_deposit_amount
    }

    /// The threshold a committee of `committee_size` operators must use, or `None` if no
    /// committee of that size is allowed
    pub fn threshold(&self, committee_size: usize) -> Option<u64> {
        if committee_size == 0 || (committee_size - 1) % 3 != 0 {
            return None;
        }
        let f = get_f(committee_size);
        if !(1..=self.max_faults).contains(&f) {
            return None;
        }
        Some((2 * f + 1) as u64)
    }

    /// Private constructor so it can only be built by our `ConfigBuilder`.
    fn from_builder(builder: &ConfigBuilder) -> Self {
        Self {
            max_faults: builder.max_faults,
            max_batch_size: builder.max_batch_size,
            min_deposit_amount: builder.min_deposit_amount,
            max_deposit_amount: builder.max_deposit_amount,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_builder(&ConfigBuilder::default())
    }
}

fn get_f(members: usize) -> usize {
    (members - 1) / 3
}

/// Builder struct for constructing the ceremony configuration
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    max_faults: usize,
    max_batch_size: usize,
    min_deposit_amount: u64,
    max_deposit_amount: u64,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder {
            max_faults: MAX_SUPPORTED_FAULTS,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            min_deposit_amount: MIN_ACTIVATION_BALANCE,
            max_deposit_amount: MAX_EFFECTIVE_BALANCE,
        }
    }

    pub fn max_faults(&self) -> usize {
        self.max_faults
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    pub fn min_deposit_amount(&self) -> u64 {
        self.min_deposit_amount
    }

    pub fn max_deposit_amount(&self) -> u64 {
        self.max_deposit_amount
    }

    // Chained setter methods to override defaults
    pub fn with_max_faults(mut self, max_faults: usize) -> Self {
        self.max_faults = max_faults;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn with_min_deposit_amount(mut self, min_deposit_amount: u64) -> Self {
        self.min_deposit_amount = min_deposit_amount;
        self
    }

    pub fn with_max_deposit_amount(mut self, max_deposit_amount: u64) -> Self {
        self.max_deposit_amount = max_deposit_amount;
        self
    }

    pub fn build(self) -> Result<Config, ConfigBuilderError> {
        // Validate `max_faults`
        if !(1..=MAX_SUPPORTED_FAULTS).contains(&self.max_faults) {
            return Err(ConfigBuilderError::InvalidMaxFaults);
        }

        // Validate `max_batch_size`
        if self.max_batch_size == 0 {
            return Err(ConfigBuilderError::ZeroMaxBatchSize);
        }

        // Validate the deposit range
        if self.min_deposit_amount == 0 {
            return Err(ConfigBuilderError::ZeroMinDeposit);
        }
        if self.min_deposit_amount > self.max_deposit_amount {
            return Err(ConfigBuilderError::InvalidDepositRange);
        }

        Ok(Config::from_builder(&self))
    }
}
