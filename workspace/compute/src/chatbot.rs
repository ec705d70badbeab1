//! Scripted FAQ bot.
//!
//! Input is lower-cased and trimmed, then tested against an ordered list of
//! rules; the first rule whose pattern matches decides the reply. When nothing
//! matches a fallback prompt is picked at random. The weather rule is first in
//! line and does a live lookup for the city named after "in".

use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, Offset, Utc};
use common::Transcript;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::{debug, error, instrument, trace, warn};

use crate::clock::Clock;
use crate::error::{ComputeError, Result};
use crate::weather::{WeatherLookup, WeatherOutcome};

pub const DEFAULT_CITY: &str = "Kolkata";

pub const JOKES: [&str; 3] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "Did you hear about the mathematician who's afraid of negative numbers? He'll stop at nothing to avoid them!",
    "Why don't skeletons fight each other? They don't have the guts!",
];

pub const FALLBACKS: [&str; 3] = [
    "Could you rephrase that?",
    "I'm not sure I understand. Try asking about time, date, or requesting a joke!",
    "I'm still learning. Maybe try a different question?",
];

pub const WEATHER_FAILURE: &str = "Oops! I had trouble fetching the weather data. Try again later.";

/// How a matched rule produces its reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Fixed(&'static str),
    /// One entry picked uniformly at random.
    Pick(&'static [&'static str]),
    /// Current date and time from the bot's clock.
    DateTime,
    /// Live lookup through the bot's [`WeatherLookup`].
    LiveWeather,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Regex,
    pub reply: Reply,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, reply: Reply) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| ComputeError::Runtime(format!("Invalid pattern for rule {}: {}", name, e)))?;
        Ok(Self { name, pattern, reply })
    }
}

/// The rule chain in evaluation order.
pub fn default_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("weather", r"weather|forecast|temperature|rain|sunny", Reply::LiveWeather)?,
        Rule::new(
            "greeting",
            r"hello|hi|hey|greetings|what's up|howdy",
            Reply::Fixed("Hi there! How can I assist you today?"),
        )?,
        Rule::new(
            "help",
            r"help|support|assistance|problem|issue",
            Reply::Fixed(
                "I can help with various topics. Are you looking for technical support, general information, or something else?",
            ),
        )?,
        Rule::new(
            "thanks",
            r"thanks|thank you|appreciate|grateful|cheers|thx",
            Reply::Fixed("You're very welcome! Let me know if there's anything else I can do for you."),
        )?,
        Rule::new(
            "goodbye",
            r"bye|goodbye|see you|later|farewell|adios",
            Reply::Fixed("Goodbye! Have a wonderful day! Come back if you have more questions."),
        )?,
        Rule::new(
            "identity",
            r"name|who are you|what are you|identify|yourself",
            Reply::Fixed(
                "I'm an AI chatbot designed to answer questions and provide assistance. You can call me HelperBot!",
            ),
        )?,
        Rule::new(
            "creator",
            r"who made you|who created you|who is your creator|who are you made by|who built you",
            Reply::Fixed(
                "I was created by Aritra halder. You can find me on GitHub at https://github.com/Aritra0701",
            ),
        )?,
        Rule::new("datetime", r"time|date|day|today|current|now", Reply::DateTime)?,
        // Never reached while the live weather rule is first.
        Rule::new(
            "weather_offline",
            r"weather|forecast|temperature|rain|sunny",
            Reply::Fixed(
                "I can't check live weather, but you might want to try a weather service or app for accurate forecasts.",
            ),
        )?,
        Rule::new("joke", r"joke|funny|make me laugh|humor", Reply::Pick(&JOKES))?,
        Rule::new(
            "capabilities",
            r"what can you do|abilities|features|capabilities",
            Reply::Fixed(
                "I can answer questions, tell jokes, provide the current time and date, and have simple conversations. I'm always learning new skills!",
            ),
        )?,
        Rule::new(
            "wellbeing",
            r"how are you|how's it going|how do you feel",
            Reply::Fixed(
                "I'm just a program, so I don't have feelings, but I'm functioning perfectly! How about you?",
            ),
        )?,
    ])
}

pub struct Chatbot<W, C = Arc<dyn Clock>, R = StdRng> {
    rules: Vec<Rule>,
    city_pattern: Regex,
    weather: W,
    clock: C,
    rng: Mutex<R>,
}

impl<W: WeatherLookup> Chatbot<W> {
    /// Default rules and an entropy seeded RNG around a shared clock.
    pub fn new(weather: W, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::with_parts(weather, clock, StdRng::from_entropy())
    }
}

impl<W, C, R> Chatbot<W, C, R>
where
    W: WeatherLookup,
    C: Clock,
    R: Rng + Send,
{
    pub fn with_parts(weather: W, clock: C, rng: R) -> Result<Self> {
        let city_pattern = Regex::new(r"in\s+([a-zA-Z\s]+)")
            .map_err(|e| ComputeError::Runtime(format!("Invalid city pattern: {}", e)))?;
        Ok(Self {
            rules: default_rules()?,
            city_pattern,
            weather,
            clock,
            rng: Mutex::new(rng),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching the normalized input.
    pub fn matching_rule(&self, input: &str) -> Option<&Rule> {
        let normalized = input.trim().to_lowercase();
        self.rules.iter().find(|rule| rule.pattern.is_match(&normalized))
    }

    /// City named in "... in <city>", or the default city.
    pub fn city_from(&self, input: &str) -> String {
        let normalized = input.trim().to_lowercase();
        self.city_pattern
            .captures(&normalized)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|city| !city.is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    /// Answer one message, telling the time in UTC.
    pub async fn respond(&self, input: &str) -> String {
        self.respond_in(input, Utc.fix()).await
    }

    /// Answer one message, telling the time at `offset` from UTC.
    #[instrument(skip(self))]
    pub async fn respond_in(&self, input: &str, offset: FixedOffset) -> String {
        let Some(rule) = self.matching_rule(input) else {
            trace!("No rule matched, using a fallback prompt");
            return self.pick(&FALLBACKS);
        };
        debug!("Matched rule {}", rule.name);

        match &rule.reply {
            Reply::Fixed(text) => text.to_string(),
            Reply::Pick(options) => self.pick(options),
            Reply::DateTime => {
                let now = self.clock.now().with_timezone(&offset);
                format!(
                    "Today is {}. The current time is {}.",
                    now.format("%A, %B %-d, %Y"),
                    now.format("%-I:%M:%S %p")
                )
            }
            Reply::LiveWeather => self.describe_weather(&self.city_from(input)).await,
        }
    }

    /// Append the user's message and the bot's answer to `transcript`.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn converse(&self, transcript: &mut Transcript, input: &str) -> Option<String> {
        let message = transcript.push_user(input)?;
        let reply = self.respond(&message).await;
        transcript.push_bot(reply.clone());
        Some(reply)
    }

    async fn describe_weather(&self, city: &str) -> String {
        match self.weather.current_weather(city).await {
            Ok(WeatherOutcome::Found(report)) => format!(
                "The weather in {} is {} with a temperature of {}°C.",
                report.name, report.description, report.temperature
            ),
            Ok(WeatherOutcome::NotFound) => {
                warn!("No weather for city {:?}", city);
                format!(
                    "Sorry, I couldn't find the weather for \"{}\". Please try another city.",
                    city
                )
            }
            Err(e) => {
                error!("Weather lookup failed: {}", e);
                WEATHER_FAILURE.to_string()
            }
        }
    }

    fn pick(&self, options: &[&'static str]) -> String {
        let choice = match self.rng.lock() {
            Ok(mut rng) => options.choose(&mut *rng).copied(),
            Err(poisoned) => options.choose(&mut *poisoned.into_inner()).copied(),
        };
        choice.unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::testing::StaticWeather;
    use crate::weather::WeatherReport;
    use chrono::{TimeZone, Utc};

    fn bot(weather: StaticWeather) -> Chatbot<StaticWeather, FixedClock, StdRng> {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 2, 5, 14, 7, 9).unwrap());
        Chatbot::with_parts(weather, clock, StdRng::seed_from_u64(17)).unwrap()
    }

    fn kolkata() -> StaticWeather {
        StaticWeather::new().with_city(
            "kolkata",
            WeatherReport {
                name: "Kolkata".to_string(),
                description: "haze".to_string(),
                temperature: 31.5,
            },
        )
    }

    #[tokio::test]
    async fn test_greeting() {
        let bot = bot(StaticWeather::new());
        assert_eq!(bot.respond("hello").await, "Hi there! How can I assist you today?");
        assert_eq!(bot.respond("  HELLO  ").await, "Hi there! How can I assist you today?");
    }

    #[tokio::test]
    async fn test_joke_is_one_of_three() {
        let bot = bot(StaticWeather::new());
        for _ in 0..20 {
            let reply = bot.respond("tell me a joke").await;
            assert!(JOKES.contains(&reply.as_str()), "unexpected joke {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_unmatched_input_uses_fallback() {
        let bot = bot(StaticWeather::new());
        assert!(bot.matching_rule("qwerty").is_none());
        for _ in 0..20 {
            let reply = bot.respond("qwerty").await;
            assert!(FALLBACKS.contains(&reply.as_str()), "unexpected fallback {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_rule_order() {
        let bot = bot(StaticWeather::new());
        let rule = |input: &str| bot.matching_rule(input).map(|r| r.name);

        assert_eq!(rule("thanks a lot"), Some("thanks"));
        assert_eq!(rule("goodbye"), Some("goodbye"));
        assert_eq!(rule("what is your name"), Some("identity"));
        assert_eq!(rule("who made you"), Some("creator"));
        assert_eq!(rule("how are you"), Some("wellbeing"));
        assert_eq!(rule("what can you do"), Some("capabilities"));
        // "this" contains "hi", so the greeting wins over the joke.
        assert_eq!(rule("this is funny"), Some("greeting"));
        // Live weather always shadows the offline weather reply.
        assert_eq!(rule("is it sunny"), Some("weather"));
        assert!(bot.rules().iter().any(|r| r.name == "weather_offline"));
    }

    #[tokio::test]
    async fn test_date_and_time() {
        let bot = bot(StaticWeather::new());
        assert_eq!(
            bot.respond("what day is it").await,
            "Today is Monday, February 5, 2024. The current time is 2:07:09 PM."
        );
    }

    #[tokio::test]
    async fn test_date_and_time_at_offset() {
        let bot = bot(StaticWeather::new());
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(
            bot.respond_in("what time is it", ist).await,
            "Today is Monday, February 5, 2024. The current time is 7:37:09 PM."
        );

        let hawaii = FixedOffset::west_opt(10 * 3600).unwrap();
        assert_eq!(
            bot.respond_in("what is the date", hawaii).await,
            "Today is Monday, February 5, 2024. The current time is 4:07:09 AM."
        );
    }

    #[tokio::test]
    async fn test_shared_clock() {
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()));
        let bot = Chatbot::new(StaticWeather::new(), clock).unwrap();
        assert_eq!(
            bot.respond("what day is it").await,
            "Today is Friday, March 15, 2024. The current time is 10:30:00 AM."
        );
    }

    #[tokio::test]
    async fn test_weather_defaults_to_kolkata() {
        let bot = bot(kolkata());
        assert_eq!(bot.city_from("what's the weather"), DEFAULT_CITY);
        assert_eq!(
            bot.respond("What's the weather like?").await,
            "The weather in Kolkata is haze with a temperature of 31.5°C."
        );
    }

    #[tokio::test]
    async fn test_weather_city_parsing() {
        let bot = bot(StaticWeather::new());
        assert_eq!(bot.city_from("weather in New York"), "new york");
        assert_eq!(bot.city_from("is it raining in paris?"), "paris");
    }

    #[tokio::test]
    async fn test_weather_unknown_city() {
        let bot = bot(kolkata());
        assert_eq!(
            bot.respond("temperature in atlantis").await,
            "Sorry, I couldn't find the weather for \"atlantis\". Please try another city."
        );
    }

    #[tokio::test]
    async fn test_weather_transport_failure() {
        let bot = bot(StaticWeather::failing("dns error"));
        assert_eq!(bot.respond("forecast in london").await, WEATHER_FAILURE);
    }

    #[tokio::test]
    async fn test_converse_updates_transcript() {
        let bot = bot(StaticWeather::new());
        let mut transcript = Transcript::new();

        assert_eq!(bot.converse(&mut transcript, "   ").await, None);
        assert_eq!(transcript.len(), 1);

        let reply = bot.converse(&mut transcript, "Hello").await.unwrap();
        assert_eq!(reply, "Hi there! How can I assist you today?");
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].text, "Hello");
        assert_eq!(transcript.messages()[2].text, reply);
    }
}
