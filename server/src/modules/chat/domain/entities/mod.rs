// Chat Domain - Entities
// 实体通过唯一标识符来识别

mod turn;

pub use turn::*;
