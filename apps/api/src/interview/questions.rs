use rand::seq::SliceRandom;
use rand::Rng;

/// The built-in system design questions.
pub const SYSTEM_DESIGN_QUESTIONS: &[&str] = &[
    "Design a URL shortener like bit.ly or TinyURL",
    "Design a social media feed like Twitter or Facebook",
    "Design a chat system like WhatsApp or Slack",
    "Design a video streaming platform like YouTube or Netflix",
    "Design a ride-sharing service like Uber or Lyft",
    "Design a search engine like Google",
    "Design an online marketplace like Amazon or eBay",
    "Design a notification system for mobile apps",
    "Design a distributed cache system like Redis",
    "Design a file storage service like Dropbox or Google Drive",
    "Design a recommendation system for e-commerce",
    "Design a web crawler system",
    "Design a real-time gaming leaderboard",
    "Design a food delivery system like DoorDash or UberEats",
    "Design a parking lot system",
    "Design a hotel booking system like Booking.com",
    "Design a distributed job scheduler",
    "Design a content delivery network (CDN)",
    "Design a messaging queue system like Apache Kafka",
    "Design a location-based service like Foursquare",
];

/// Ordered list of interview questions with uniform random selection.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new(SYSTEM_DESIGN_QUESTIONS.iter().map(|q| q.to_string()).collect())
    }
}

impl QuestionBank {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    pub fn list(&self) -> &[String] {
        &self.questions
    }

    /// Picks a question uniformly at random. `None` only when the bank is empty.
    pub fn pick(&self) -> Option<&str> {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.questions.choose(rng).map(String::as_str)
    }
}
