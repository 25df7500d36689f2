//unit is expander pin number (GPA3)
pub const PLANT_LAMP_PIN : u8 = 3;

//how long the bench check keeps the lamp lit
pub const BENCH_HOLD_MS : u64 = 2000;
