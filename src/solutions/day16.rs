use anyhow::{bail, ensure, Context, Result};

use crate::binary_to_decimal;

struct Bits {
    bits: Vec<u8>,
    pos: usize,
}

impl Bits {
    fn from_hex(message: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(message.len() * 4);
        for c in message.trim().chars() {
            let nibble = c
                .to_digit(16)
                .with_context(|| format!("invalid hex digit {:?}", c))?;
            bits.extend((0..4).rev().map(|i| ((nibble >> i) & 1) as u8));
        }
        Ok(Self { bits, pos: 0 })
    }

    fn read(&mut self, n: usize) -> Result<u64> {
        ensure!(self.pos + n <= self.bits.len(), "transmission truncated");
        let value = binary_to_decimal(&self.bits[self.pos..self.pos + n]);
        self.pos += n;
        Ok(value)
    }
}

#[derive(Debug)]
enum Payload {
    Literal(u64),
    Operator { type_id: u8, operands: Vec<Packet> },
}

#[derive(Debug)]
struct Packet {
    version: u8,
    payload: Payload,
}

impl Packet {
    fn parse(bits: &mut Bits) -> Result<Self> {
        let version = bits.read(3)? as u8;
        let type_id = bits.read(3)? as u8;

        let payload = if type_id == 4 {
            let mut value = 0u64;
            loop {
                let group = bits.read(5)?;
                ensure!(value.leading_zeros() >= 4, "literal overflows 64 bits");
                value = (value << 4) | (group & 0xf);
                if group & 0x10 == 0 {
                    break;
                }
            }
            Payload::Literal(value)
        } else {
            let mut operands = Vec::new();
            if bits.read(1)? == 0 {
                let length = bits.read(15)? as usize;
                let end = bits.pos + length;
                while bits.pos < end {
                    operands.push(Packet::parse(bits)?);
                }
                ensure!(bits.pos == end, "sub-packets overrun their declared length");
            } else {
                for _ in 0..bits.read(11)? {
                    operands.push(Packet::parse(bits)?);
                }
            }
            ensure!(!operands.is_empty(), "operator without operands");
            Payload::Operator { type_id, operands }
        };

        Ok(Packet { version, payload })
    }

    fn version_sum(&self) -> u64 {
        let nested = match &self.payload {
            Payload::Literal(_) => 0,
            Payload::Operator { operands, .. } => operands.iter().map(Packet::version_sum).sum(),
        };
        u64::from(self.version) + nested
    }

    fn value(&self) -> Result<u64> {
        let (type_id, operands) = match &self.payload {
            Payload::Literal(value) => return Ok(*value),
            Payload::Operator { type_id, operands } => (*type_id, operands),
        };
        let values = operands
            .iter()
            .map(Packet::value)
            .collect::<Result<Vec<_>>>()?;

        Ok(match type_id {
            0 => values.iter().sum(),
            1 => values.iter().product(),
            2 => values.iter().copied().min().unwrap_or(0),
            3 => values.iter().copied().max().unwrap_or(0),
            5..=7 => {
                let [a, b] = values[..] else {
                    bail!("comparison needs exactly two operands, got {}", values.len());
                };
                let holds = match type_id {
                    5 => a > b,
                    6 => a < b,
                    _ => a == b,
                };
                u64::from(holds)
            }
            _ => bail!("unknown packet type {}", type_id),
        })
    }
}

pub fn day16(input: &str) -> Result<(u64, u64)> {
    // Whatever follows the outermost packet is padding.
    let packet = Packet::parse(&mut Bits::from_hex(input)?)?;
    Ok((packet.version_sum(), packet.value()?))
}
