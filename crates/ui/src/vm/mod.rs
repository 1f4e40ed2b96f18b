mod markup;
mod quiz_vm;
mod time_fmt;

pub use markup::sanitize_html;
pub use quiz_vm::{
    OptionVm, PaletteItemVm, QuizVm, ReportRowVm, ReportVm, map_quiz, map_report, palette_class,
    palette_legend,
};
pub use time_fmt::{format_datetime, format_elapsed};
