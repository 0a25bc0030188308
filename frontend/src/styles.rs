pub const CONTAINER: &str = "bg-slate-900 container mx-auto px-6 py-10 max-w-4xl rounded-xl shadow-lg mt-16";
pub const CONTAINER_SM: &str = "container mx-auto px-6 py-10 max-w-2xl rounded-xl shadow-lg mt-16";

pub const CARD_HOVER_SCALE: &str = "bg-slate-800 border border-slate-700 rounded-lg shadow-md p-6 transform transition-transform duration-200 hover:scale-105";
pub const CARD_SECTION: &str = "bg-slate-800 border border-slate-700 p-3 rounded-lg shadow-sm";
pub const PANEL: &str = "bg-slate-800 p-6 rounded-lg shadow-lg";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";

pub const INPUT_BASE: &str = "appearance-none border border-slate-600 bg-slate-800 text-white text-lg rounded-md w-full py-2 px-4 focus:outline-none focus:border-indigo-500";
pub const INPUT_GROUP: &str = "flex-1 flex flex-col gap-2";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-indigo-600 hover:bg-indigo-700 focus:ring-2 focus:ring-indigo-400 focus:outline-none";
pub const BUTTON_SUCCESS: &str = "bg-green-600 hover:bg-green-700 focus:ring-2 focus:ring-green-400 focus:outline-none";
pub const BUTTON_DANGER: &str = "bg-red-600 hover:bg-red-700 focus:ring-2 focus:ring-red-400 focus:outline-none";
pub const BUTTON_NEUTRAL: &str = "bg-slate-600 hover:bg-slate-700 focus:ring-2 focus:ring-slate-400 focus:outline-none";
pub const BUTTON_FULL: &str = "w-full py-3 px-5 font-semibold rounded-lg transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed mt-8";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-slate-200";
pub const TEXT_LABEL_SM: &str = "block text-xs font-medium text-slate-400 mb-2";
pub const TEXT_ERROR: &str = "text-sm text-red-500 font-semibold";
pub const TEXT_MUTED: &str = "text-sm text-slate-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-4 text-center text-slate-100";
pub const HEADING_MD: &str = "text-2xl font-bold mb-5 text-slate-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-slate-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const GRID_COLS_3: &str = "grid grid-cols-3 gap-4";
pub const SPACE_Y_LG: &str = "space-y-6";

pub const NAV_LINK: &str = "text-base md:text-lg font-medium px-4 py-2 rounded-md transition-colors duration-200 ease-in-out text-slate-200 border border-transparent hover:border-indigo-400 hover:text-indigo-400";
pub const NAV_LINK_ACTIVE: &str = "text-indigo-400 border-indigo-400 ring-2 ring-indigo-500 ring-offset-1 ring-offset-slate-900";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, BUTTON_FULL))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn alert_style(style: &str) -> String {
    match style {
        "error" => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        "success" => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        _ => combine_classes(ALERT_CARD, "bg-indigo-500 text-white shadow-lg"),
    }
}
