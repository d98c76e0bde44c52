pub mod clock;
pub mod enums;
pub mod item;
pub mod pause;
pub mod task;
pub mod views;

pub use clock::{Clock, SystemClock};
pub use enums::{ItemStatus, View};
pub use item::Item;
pub use pause::PauseState;
pub use task::{aggregate_status, next_task_code, Task};
pub use views::{clamp_cursor, format_elapsed, items_of_task, task_elapsed};
