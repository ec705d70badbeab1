pub mod chatbot;
pub mod forecast_cards;
pub mod forecast_chart;
pub mod navbar;
pub mod prediction_form;
pub mod recent_events;
