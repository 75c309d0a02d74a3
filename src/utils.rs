/// 在WebAssembly环境中安装panic钩子，让panic信息打印到浏览器的控制台。
///
/// 需要开启 `console_error_panic_hook` 特性（默认开启）。多次调用也没有关系。
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
