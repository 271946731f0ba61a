/// The company month runs from the 18th of one month to the 17th of the next.
pub const PAY_PERIOD_START_DAY: u32 = 18;
pub const PAY_PERIOD_END_DAY: u32 = 17;

/// Standard working days per pay period, used to pro-rate monthly salaries
/// into an effective hourly rate.
pub const STANDARD_WORKING_DAYS: u32 = 22;

/// Days of service before an employee becomes eligible for leave.
pub const LEAVE_ELIGIBILITY_DAYS: i64 = 90;

/// Bulk import and roster dates are strictly day-first.
pub const IMPORT_DATE_FORMAT: &str = "%d/%m/%Y";
