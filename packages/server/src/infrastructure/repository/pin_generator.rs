//! 乱数による PIN 生成

use rand::Rng;

use crate::domain::{
    Pin, PinGenerator, ValueObjectError,
    value_object::{PIN_MAX, PIN_MIN},
};

/// `PIN_MIN..=PIN_MAX` から一様に PIN を選ぶ生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPinGenerator;

impl PinGenerator for RandomPinGenerator {
    fn generate(&self) -> Result<Pin, ValueObjectError> {
        Pin::from_number(rand::rng().random_range(PIN_MIN..=PIN_MAX))
    }
}
