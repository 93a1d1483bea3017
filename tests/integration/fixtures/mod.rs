// Page texts shared by the integration tests
// WHY: each page sits on a known side of the complexity gate

#![allow(dead_code)]

/// Five paragraphs of technical prose; well above every gate threshold
pub const COMPLEX_ARTICLE: &str = r#"Modern web platforms utilize a substantial amount of infrastructure to deliver content. Every request travels from the browser to a server, which queries a database and returns a response through an API.

Engineers demonstrate that careful optimization of each algorithm can reduce latency by approximately forty percent. Furthermore, encryption protects the data while it moves across the network, although it requires additional processing on both ends.

Teams that facilitate collaboration between developers and stakeholders tend to ship features faster. They establish clear protocols, maintain shared documentation, and identify bottlenecks before they become outages.

Caching frequently requested pages is one of the simplest improvements. A cache sitting in front of the database can eliminate most repeated queries, and subsequently the servers handle more visitors with the same hardware.

In order to measure progress, organizations track revenue, expenditure and scalability over time. These numbers indicate whether the investment in infrastructure produced a significant return."#;

/// Plain story text, long enough to analyze but never complex
pub const SIMPLE_PAGE: &str = "Sam has a red dog named Max. Max likes to run in the park. Every day they walk to the lake. The sun is warm and the grass is soft. Sam throws a ball and Max brings it back. They play until the sky turns pink. Then they go home for dinner. Mom makes soup and bread. Max sleeps by the fire. Sam reads a book before bed. It was a good day for both of them.";

/// Below the minimum text an explain run accepts
pub const SHORT_PAGE: &str = "Menu Home About";

/// Navigation-style text with no sentence punctuation
pub const UNPUNCTUATED_PAGE: &str = "Quarterly revenue grew across every region this year
Infrastructure spending stayed flat compared with last year
Contact
Server migration to the new database finishes next month";

/// One sentence with two simplifiable words and two jargon terms
pub const JARGON_SENTENCE: &str = "The API facilitates substantial optimization.";
