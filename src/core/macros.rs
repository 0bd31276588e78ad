//! 核心宏定义

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use particle_fountain::impl_default;
///
/// struct EmitterLimits {
///     max_speed: f32,
///     label: String,
/// }
///
/// impl_default!(EmitterLimits {
///     max_speed: 1.0,
///     label: String::new(),
/// });
///
/// assert_eq!(EmitterLimits::default().max_speed, 1.0);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
