// Ports define what the service needs from storage, without implementing it.
//
// Responsibilities
// - Keep the service independent of PostgreSQL by coding against a trait.
// - Adapters classify their own failures into `TimesheetError` kinds:
//   uniqueness violations are `Duplicate`, zero affected rows are `NotFound`.
//
// Testing guidance
// - The in memory adapter implements the same contract for tests and local runs.

use async_trait::async_trait;

use crate::modules::timesheets::core::errors::TimesheetError;
use crate::modules::timesheets::core::timesheet::{
    EntryDraft, Timesheet, TimesheetEntry, TimesheetFilter, TimesheetStats,
};

#[async_trait]
pub trait TimesheetRepository: Send + Sync {
    /// Inserts the header and writes the generated id and `created_at` back.
    async fn create(&self, timesheet: &mut Timesheet) -> Result<i64, TimesheetError>;

    /// Header plus entries ordered by work date ascending.
    async fn find_by_id(&self, id: i64) -> Result<Timesheet, TimesheetError>;

    /// Headers only, most recent period first.
    async fn list(&self, filter: &TimesheetFilter) -> Result<Vec<Timesheet>, TimesheetError>;

    async fn update(&self, timesheet: &Timesheet) -> Result<(), TimesheetError>;

    /// Removes the header together with its entries.
    async fn delete(&self, id: i64) -> Result<(), TimesheetError>;

    /// Inserts the entry and writes the generated id and `created_at` back.
    async fn add_entry(&self, entry: &mut TimesheetEntry) -> Result<i64, TimesheetError>;

    /// Replaces every field of the entry; an absent work date keeps the stored one.
    async fn update_entry(&self, id: i64, draft: &EntryDraft) -> Result<(), TimesheetError>;

    async fn delete_entry(&self, id: i64) -> Result<(), TimesheetError>;

    async fn stats(&self, timesheet_id: i64) -> Result<TimesheetStats, TimesheetError>;

    async fn ping(&self) -> Result<(), TimesheetError>;
}
