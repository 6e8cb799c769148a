pub mod dashboard;
pub mod list_picker;
pub mod match_board;
pub mod menu;
pub mod progress_bar;
pub mod quiz_view;
pub mod word_table;
