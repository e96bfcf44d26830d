//! Chamada - 语音合成与叫号播报缓存网关
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 缓存 key 推导、命名空间、短语净化、发音人解析（纯函数）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AudioCache, TtsEngine）
//! - Speak: 双形态请求解析（自由文本 / ticket+counter 叫号）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 静态工件托管
//! - Persistence: 文件系统三命名空间缓存 + JSON 统计索引
//! - Adapters: HTTP TTS 引擎客户端 / 测试用 Fake

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
