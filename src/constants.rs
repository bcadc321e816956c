/// 每题默认选项数量
pub const DEFAULT_OPTIONS_COUNT: usize = 6;

/// 允许的选项数量
pub const ALLOWED_OPTIONS_COUNTS: &[usize] = &[4, 6, 8];

/// 答错后重新插入队列的最小间隔
pub const MIN_RETRY_GAP: usize = 4;

/// 答错后重新插入队列的最大间隔
pub const MAX_RETRY_GAP: usize = 10;

/// 默认每日目标单词数
pub const DEFAULT_DAILY_GOAL: u32 = 20;

/// 设置面板提供的每日目标
pub const DAILY_GOAL_PRESETS: &[u32] = &[10, 20, 50];

/// 每日目标上限
pub const MAX_DAILY_GOAL: u32 = 500;

/// 触发里程碑提醒的连续天数
pub const DEFAULT_STREAK_MILESTONES: &[u32] = &[7, 14, 30, 50, 100];

/// 连续天数进入"即将中断"状态所需的不活跃小时数
pub const DEFAULT_STREAK_AT_RISK_HOURS: i64 = 20;

/// 默认稍后提醒时长（小时）
pub const DEFAULT_SNOOZE_HOURS: i64 = 2;

/// 稍后提醒时长上限（小时）
pub const MAX_SNOOZE_HOURS: i64 = 24;

/// 默认提醒时间
pub const DEFAULT_REMINDER_HOUR: u8 = 9;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;

/// 提醒时间可选范围：06:00 到 23:30，每 30 分钟一档
pub const REMINDER_FIRST_HOUR: u8 = 6;
pub const REMINDER_LAST_HOUR: u8 = 23;
pub const REMINDER_MINUTE_STEP: u8 = 30;

