//! 页面级状态控制器
//!
//! 每个视图持有自己的状态与 `ViewScope`，通过 `ActionOrchestrator` 访问备份服务。

pub mod create;
pub mod detail;
pub mod list;
pub mod logs;
pub mod scope;

pub use create::CreateView;
pub use detail::DetailView;
pub use list::ListView;
pub use logs::LogsView;
pub use scope::ViewScope;
