//! MOS 6502 execution core.
//!
//! One `step` fetches, decodes, resolves the operand address, and executes a
//! single instruction atomically, accruing cycles as real silicon would:
//! base cost from the catalogue, +1 on page-crossing reads, +1/+2 on taken
//! branches. The indirect-pointer page-wrap bug is reproduced exactly.

use crate::bus::Bus;
use crate::cpu::flags::Flags;
use crate::cpu::instruction::{AddressingMode, Instruction, Operation, decode};
use crate::error::Error;
use crate::trace::StepTrace;

/// CPU registers plus the running cycle counter. All 8-bit registers wrap
/// mod 256 and the program counter mod 65536; cycles only ever grow.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub flags: Flags,
    pub cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu::default()
    }

    /// Power-on reset: P from 0x34, A=X=Y=0, SP=0xFD, and the APU control
    /// and channel registers cleared through the bus. PC is left for the
    /// driver (reset vector or a forced entry point).
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.flags = Flags::from_byte(0x34);
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        bus.write(0x4017, 0);
        bus.write(0x4015, 0);
        for addr in 0x4000..=0x400F {
            bus.write(addr, 0);
        }
    }

    /// Execute exactly one instruction. Returns the trace record for the
    /// step, or an error when the opcode jams the CPU (nothing is mutated
    /// in that case).
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<StepTrace, Error> {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let ins = decode(opcode);
        if ins.op == Operation::Kil {
            return Err(Error::IllegalOpcode { opcode, pc });
        }

        // Operand bytes follow the opcode, little-endian.
        let size = ins.size();
        let mut operand = [0u8; 2];
        let mut raw = 0u16;
        for i in 0..size - 1 {
            let byte = bus.read(pc.wrapping_add(1 + i));
            operand[i as usize] = byte;
            raw |= (byte as u16) << (8 * i);
        }

        // PC moves past the instruction before the body runs; JSR and BRK
        // push the already-advanced counter.
        self.pc = pc.wrapping_add(size);
        self.cycles += ins.cycles as u64;

        let (addr, page_crossed) = self.resolve(ins.mode, raw, bus);
        if page_crossed && ins.page_cycle {
            self.cycles += 1;
        }

        self.execute(&ins, addr, bus);

        Ok(StepTrace {
            pc,
            opcode,
            op: ins.op,
            mode: ins.mode,
            addr,
            operand,
        })
    }

    /// Turn an addressing mode plus raw operand into an effective address,
    /// and report whether indexing crossed a page. Relative never reports a
    /// cross; its penalty depends on the branch being taken.
    fn resolve<B: Bus>(&mut self, mode: AddressingMode, operand: u16, bus: &mut B) -> (u16, bool) {
        match mode {
            AddressingMode::Absolute | AddressingMode::ZeroPage => (operand, false),
            AddressingMode::Implied | AddressingMode::Accumulator => (0, false),
            AddressingMode::AbsoluteX => indexed(operand, self.x),
            AddressingMode::AbsoluteY => indexed(operand, self.y),
            AddressingMode::Indirect => (read_word_bug(bus, operand), false),
            AddressingMode::IndirectX => {
                let ptr = operand.wrapping_add(self.x as u16) & 0x00FF;
                (read_word_bug(bus, ptr), false)
            }
            AddressingMode::IndirectY => {
                let base = read_word_bug(bus, operand & 0x00FF);
                indexed(base, self.y)
            }
            // The operand byte's own location, so reads work uniformly.
            AddressingMode::Immediate => (self.pc.wrapping_sub(1), false),
            AddressingMode::Relative => {
                let offset = operand as u8 as i8;
                (self.pc.wrapping_add(offset as u16), false)
            }
            AddressingMode::ZeroPageX => (operand.wrapping_add(self.x as u16) & 0x00FF, false),
            AddressingMode::ZeroPageY => (operand.wrapping_add(self.y as u16) & 0x00FF, false),
        }
    }

    fn execute<B: Bus>(&mut self, ins: &Instruction, addr: u16, bus: &mut B) {
        match ins.op {
            Operation::Nop => {}
            Operation::Adc => self.adc(bus, addr),
            Operation::And => self.and(bus, addr),
            Operation::Asl => self.asl(bus, addr, ins.mode),
            Operation::Bcc => self.branch(!self.flags.carry, addr),
            Operation::Bcs => self.branch(self.flags.carry, addr),
            Operation::Beq => self.branch(self.flags.zero, addr),
            Operation::Bit => self.bit(bus, addr),
            Operation::Bmi => self.branch(self.flags.negative, addr),
            Operation::Bne => self.branch(!self.flags.zero, addr),
            Operation::Bpl => self.branch(!self.flags.negative, addr),
            Operation::Brk => self.brk(bus),
            Operation::Bvc => self.branch(!self.flags.overflow, addr),
            Operation::Bvs => self.branch(self.flags.overflow, addr),
            Operation::Clc => self.flags.carry = false,
            Operation::Cld => self.flags.decimal = false,
            Operation::Cli => self.flags.irq_disable = false,
            Operation::Clv => self.flags.overflow = false,
            Operation::Cmp => self.compare(bus, addr, self.a),
            Operation::Cpx => self.compare(bus, addr, self.x),
            Operation::Cpy => self.compare(bus, addr, self.y),
            Operation::Dec => self.dec(bus, addr),
            Operation::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.flags.set_zn(self.x);
            }
            Operation::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.flags.set_zn(self.y);
            }
            Operation::Eor => self.eor(bus, addr),
            Operation::Inc => self.inc(bus, addr),
            Operation::Inx => {
                self.x = self.x.wrapping_add(1);
                self.flags.set_zn(self.x);
            }
            Operation::Iny => {
                self.y = self.y.wrapping_add(1);
                self.flags.set_zn(self.y);
            }
            Operation::Jmp => self.pc = addr,
            Operation::Jsr => {
                let ret = self.pc.wrapping_sub(1);
                self.push(bus, (ret >> 8) as u8);
                self.push(bus, ret as u8);
                self.pc = addr;
            }
            Operation::Lda => {
                self.a = bus.read(addr);
                self.flags.set_zn(self.a);
            }
            Operation::Ldx => {
                self.x = bus.read(addr);
                self.flags.set_zn(self.x);
            }
            Operation::Ldy => {
                self.y = bus.read(addr);
                self.flags.set_zn(self.y);
            }
            Operation::Lsr => self.lsr(bus, addr, ins.mode),
            Operation::Ora => self.ora(bus, addr),
            Operation::Pha => self.push(bus, self.a),
            Operation::Php => {
                // Break pair forced to 1 in the pushed copy only.
                let p = self.flags.to_byte() | 0x10;
                self.push(bus, p);
            }
            Operation::Pla => {
                self.a = self.pop(bus);
                self.flags.set_zn(self.a);
            }
            Operation::Plp => {
                let p = self.pop(bus);
                self.flags = Flags::from_byte(p);
            }
            Operation::Rol => self.rol(bus, addr, ins.mode),
            Operation::Ror => self.ror(bus, addr, ins.mode),
            Operation::Rti => {
                let p = self.pop(bus);
                self.flags = Flags::from_byte(p);
                let lo = self.pop(bus) as u16;
                let hi = self.pop(bus) as u16;
                self.pc = hi << 8 | lo;
            }
            Operation::Rts => {
                let lo = self.pop(bus) as u16;
                let hi = self.pop(bus) as u16;
                self.pc = (hi << 8 | lo).wrapping_add(1);
            }
            Operation::Sbc => self.sbc(bus, addr),
            Operation::Sec => self.flags.carry = true,
            Operation::Sed => self.flags.decimal = true, // stored, never used
            Operation::Sei => self.flags.irq_disable = true,
            Operation::Sta => bus.write(addr, self.a),
            Operation::Stx => bus.write(addr, self.x),
            Operation::Sty => bus.write(addr, self.y),
            Operation::Tax => {
                self.x = self.a;
                self.flags.set_zn(self.x);
            }
            Operation::Tay => {
                self.y = self.a;
                self.flags.set_zn(self.y);
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.flags.set_zn(self.x);
            }
            Operation::Txa => {
                self.a = self.x;
                self.flags.set_zn(self.a);
            }
            Operation::Txs => self.sp = self.x,
            Operation::Tya => {
                self.a = self.y;
                self.flags.set_zn(self.a);
            }

            // Undocumented operations. Most are two official micro-ops
            // against the same effective address.
            Operation::Dop | Operation::Top => {}
            Operation::Aax => bus.write(addr, self.a & self.x),
            Operation::Dcp => {
                self.dec(bus, addr);
                self.compare(bus, addr, self.a);
            }
            Operation::Isc => {
                self.inc(bus, addr);
                self.sbc(bus, addr);
            }
            Operation::Lax => {
                let value = bus.read(addr);
                self.a = value;
                self.x = value;
                self.flags.set_zn(value);
            }
            Operation::Rla => {
                self.rol(bus, addr, ins.mode);
                self.and(bus, addr);
            }
            Operation::Rra => {
                self.ror(bus, addr, ins.mode);
                self.adc(bus, addr);
            }
            Operation::Slo => {
                self.asl(bus, addr, ins.mode);
                self.ora(bus, addr);
            }
            Operation::Sre => {
                self.lsr(bus, addr, ins.mode);
                self.eor(bus, addr);
            }

            // Unstable on real hardware; implemented best-effort per
            // nesdev's undocumented opcode notes (choices in DESIGN.md).
            Operation::Aac => {
                self.a &= bus.read(addr);
                self.flags.set_zn(self.a);
                self.flags.carry = self.flags.negative;
            }
            Operation::Arr => {
                let value = self.a & bus.read(addr);
                let result = value >> 1 | (self.flags.carry as u8) << 7;
                self.a = result;
                self.flags.set_zn(result);
                self.flags.carry = result & 0x40 != 0;
                self.flags.overflow = (result >> 6 ^ result >> 5) & 1 != 0;
            }
            Operation::Asr => {
                let value = self.a & bus.read(addr);
                self.flags.carry = value & 0x01 != 0;
                self.a = value >> 1;
                self.flags.set_zn(self.a);
            }
            Operation::Atx => {
                let value = bus.read(addr);
                self.a = value;
                self.x = value;
                self.flags.set_zn(value);
            }
            Operation::Axa => {
                let value = self.a & self.x & high_byte_plus_one(addr);
                bus.write(addr, value);
            }
            Operation::Axs => {
                let value = bus.read(addr);
                let t = self.a & self.x;
                self.flags.carry = t >= value;
                self.x = t.wrapping_sub(value);
                self.flags.set_zn(self.x);
            }
            Operation::Lar => {
                let value = bus.read(addr) & self.sp;
                self.a = value;
                self.x = value;
                self.sp = value;
                self.flags.set_zn(value);
            }
            Operation::Sxa => bus.write(addr, self.x & high_byte_plus_one(addr)),
            Operation::Sya => bus.write(addr, self.y & high_byte_plus_one(addr)),
            Operation::Xaa => {
                self.a = self.x & bus.read(addr);
                self.flags.set_zn(self.a);
            }
            Operation::Xas => {
                self.sp = self.a & self.x;
                bus.write(addr, self.sp & high_byte_plus_one(addr));
            }

            // Rejected before dispatch.
            Operation::Kil => {}
        }
    }

    fn adc<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let value = bus.read(addr);
        let sum = self.a as u16 + value as u16 + self.flags.carry as u16;
        let result = sum as u8;

        self.flags.carry = sum > 0xFF;
        self.flags.overflow = (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0;
        self.a = result;
        self.flags.set_zn(self.a);
    }

    fn sbc<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let value = bus.read(addr);
        let borrow = !self.flags.carry as u16;
        let diff = (self.a as u16)
            .wrapping_sub(value as u16)
            .wrapping_sub(borrow);
        let result = diff as u8;

        self.flags.carry = diff < 0x100;
        self.flags.overflow = ((self.a ^ value) & (self.a ^ result)) & 0x80 != 0;
        self.a = result;
        self.flags.set_zn(self.a);
    }

    fn and<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        self.a &= bus.read(addr);
        self.flags.set_zn(self.a);
    }

    fn ora<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        self.a |= bus.read(addr);
        self.flags.set_zn(self.a);
    }

    fn eor<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        self.a ^= bus.read(addr);
        self.flags.set_zn(self.a);
    }

    fn bit<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let value = bus.read(addr);
        self.flags.zero = self.a & value == 0;
        self.flags.negative = value & 0x80 != 0;
        self.flags.overflow = value & 0x40 != 0;
    }

    /// CMP/CPX/CPY: carry when register >= operand (unsigned), Z/N from the
    /// subtraction result, which is not stored.
    fn compare<B: Bus>(&mut self, bus: &mut B, addr: u16, register: u8) {
        let value = bus.read(addr);
        self.flags.carry = register >= value;
        self.flags.set_zn(register.wrapping_sub(value));
    }

    fn asl<B: Bus>(&mut self, bus: &mut B, addr: u16, mode: AddressingMode) {
        if mode == AddressingMode::Accumulator {
            self.flags.carry = self.a & 0x80 != 0;
            self.a <<= 1;
            self.flags.set_zn(self.a);
        } else {
            let value = bus.read(addr);
            self.flags.carry = value & 0x80 != 0;
            let value = value << 1;
            bus.write(addr, value);
            self.flags.set_zn(value);
        }
    }

    fn lsr<B: Bus>(&mut self, bus: &mut B, addr: u16, mode: AddressingMode) {
        if mode == AddressingMode::Accumulator {
            self.flags.carry = self.a & 0x01 != 0;
            self.a >>= 1;
            self.flags.set_zn(self.a);
        } else {
            let value = bus.read(addr);
            self.flags.carry = value & 0x01 != 0;
            let value = value >> 1;
            bus.write(addr, value);
            self.flags.set_zn(value);
        }
    }

    fn rol<B: Bus>(&mut self, bus: &mut B, addr: u16, mode: AddressingMode) {
        let carry_in = self.flags.carry as u8;
        if mode == AddressingMode::Accumulator {
            self.flags.carry = self.a & 0x80 != 0;
            self.a = self.a << 1 | carry_in;
            self.flags.set_zn(self.a);
        } else {
            let value = bus.read(addr);
            self.flags.carry = value & 0x80 != 0;
            let value = value << 1 | carry_in;
            bus.write(addr, value);
            self.flags.set_zn(value);
        }
    }

    fn ror<B: Bus>(&mut self, bus: &mut B, addr: u16, mode: AddressingMode) {
        let carry_in = (self.flags.carry as u8) << 7;
        if mode == AddressingMode::Accumulator {
            self.flags.carry = self.a & 0x01 != 0;
            self.a = self.a >> 1 | carry_in;
            self.flags.set_zn(self.a);
        } else {
            let value = bus.read(addr);
            self.flags.carry = value & 0x01 != 0;
            let value = value >> 1 | carry_in;
            bus.write(addr, value);
            self.flags.set_zn(value);
        }
    }

    fn inc<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let value = bus.read(addr).wrapping_add(1);
        bus.write(addr, value);
        self.flags.set_zn(value);
    }

    fn dec<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let value = bus.read(addr).wrapping_sub(1);
        bus.write(addr, value);
        self.flags.set_zn(value);
    }

    /// Taken branches cost +1 cycle, +2 when the target sits in a different
    /// page than the instruction after the branch.
    fn branch(&mut self, condition: bool, addr: u16) {
        if condition {
            self.cycles += 1;
            if self.pc & 0xFF00 != addr & 0xFF00 {
                self.cycles += 1;
            }
            self.pc = addr;
        }
    }

    fn brk<B: Bus>(&mut self, bus: &mut B) {
        // BRK skips a padding byte; the pushed return address reflects it.
        let ret = self.pc.wrapping_add(1);
        self.push(bus, (ret >> 8) as u8);
        self.push(bus, ret as u8);
        self.push(bus, self.flags.to_byte() | 0x10);
        self.flags.irq_disable = true;

        let lo = bus.read(0xFFFE) as u16;
        let hi = bus.read(0xFFFF) as u16;
        self.pc = hi << 8 | lo;
    }

    /// Stack lives in page 1; the 8-bit pointer wraps within it.
    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | self.sp as u16)
    }
}

/// 16-bit base plus 8-bit index, reporting a page cross when the addition
/// changes the high byte.
fn indexed(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, base & 0xFF00 != addr & 0xFF00)
}

/// Fetch a 16-bit pointer reproducing the 6502 page-wrap bug: when the low
/// byte sits at $xxFF, the high byte comes from $xx00 of the same page
/// instead of carrying into the next one.
fn read_word_bug<B: Bus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    hi << 8 | lo
}

fn high_byte_plus_one(addr: u16) -> u8 {
    ((addr >> 8) as u8).wrapping_add(1)
}
