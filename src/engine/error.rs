// ==========================================
// 零售商品铺货分配引擎 - 引擎层错误类型
// ==========================================
// 红线: 单品缺货/缺数据一律就地吸收,不产生错误;
//       只有配置错误上抛,且必须在任何分配提交前返回
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 迭代配置错误 =====
    #[error("迭代 {iteration} 引用了未定义的分层: {segment}")]
    UndefinedSegment { iteration: String, segment: String },

    #[error("迭代 {iteration} 引用了未定义的健康门槛: {benchmark}")]
    UndefinedBenchmark { iteration: String, benchmark: String },

    #[error("迭代 {iteration} 引用了未定义的覆盖倍数: {name}")]
    UndefinedCoverMultiplier { iteration: String, name: String },

    #[error("迭代 {iteration} 的类型未知: {kind}")]
    UnknownIterationKind { iteration: String, kind: String },

    #[error("迭代标签重复: {0}")]
    DuplicateIterationTag(String),

    #[error("迭代配置无效 ({iteration}): {message}")]
    InvalidIteration { iteration: String, message: String },

    #[error("未配置任何分配迭代")]
    EmptyRunPlan,

    // ===== 阈值错误 =====
    #[error("阈值无效 ({name}): {message}")]
    InvalidThreshold { name: String, message: String },

    // ===== 配置读取错误 =====
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
