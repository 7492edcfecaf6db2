use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VivaError;

/// Interview domains with a question pool and keyword list.
///
/// The set is closed: every domain the catalog knows is enumerated here,
/// and lookups are exhaustive matches. Unknown domain *strings* coming
/// from the setup layer are handled at the parse step, not by a silent
/// table fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    WebDevelopment,
    DataStructures,
    SystemDesign,
    Behavioral,
    MachineLearning,
    MobileDevelopment,
}

/// Question difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::WebDevelopment,
        Domain::DataStructures,
        Domain::SystemDesign,
        Domain::Behavioral,
        Domain::MachineLearning,
        Domain::MobileDevelopment,
    ];

    /// Parse a setup-layer domain string. Returns `None` for anything the
    /// catalog does not know; callers decide how to degrade.
    pub fn parse(s: &str) -> Option<Domain> {
        match s {
            "web-development" => Some(Domain::WebDevelopment),
            "data-structures" => Some(Domain::DataStructures),
            "system-design" => Some(Domain::SystemDesign),
            "behavioral" => Some(Domain::Behavioral),
            "machine-learning" => Some(Domain::MachineLearning),
            "mobile-development" => Some(Domain::MobileDevelopment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::WebDevelopment => "web-development",
            Domain::DataStructures => "data-structures",
            Domain::SystemDesign => "system-design",
            Domain::Behavioral => "behavioral",
            Domain::MachineLearning => "machine-learning",
            Domain::MobileDevelopment => "mobile-development",
        }
    }

    /// Domain keyword list, ordered by relevance. Question keyword sets
    /// are leading slices of this list.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Domain::WebDevelopment => &[
                "HTML", "CSS", "JavaScript", "React", "Vue", "Angular", "Node.js",
                "responsive", "DOM", "API", "REST", "HTTP", "browser", "frontend",
                "backend",
            ],
            Domain::DataStructures => &[
                "array", "linked list", "stack", "queue", "tree", "graph", "hash",
                "algorithm", "complexity", "Big O", "recursion", "sorting", "searching",
            ],
            Domain::SystemDesign => &[
                "scalability", "load balancer", "database", "caching", "microservices",
                "API", "distributed", "consistency", "availability", "partition",
                "sharding",
            ],
            Domain::Behavioral => &[
                "teamwork", "leadership", "communication", "problem-solving",
                "adaptability", "conflict resolution", "time management", "collaboration",
            ],
            Domain::MachineLearning => &[
                "supervised", "unsupervised", "neural network", "overfitting",
                "cross-validation", "feature", "model", "training", "prediction",
                "accuracy",
            ],
            Domain::MobileDevelopment => &[
                "native", "hybrid", "iOS", "Android", "React Native", "Flutter",
                "responsive", "performance", "offline", "push notifications",
            ],
        }
    }

    /// Question pool for a difficulty tier. Every (domain, difficulty)
    /// pair carries eight questions.
    pub fn pool(&self, difficulty: Difficulty) -> &'static [&'static str] {
        match (self, difficulty) {
            (Domain::WebDevelopment, Difficulty::Beginner) => &[
                "What is the difference between HTML, CSS, and JavaScript?",
                "Explain what responsive web design means.",
                "What are semantic HTML elements and why are they important?",
                "How do you center a div in CSS?",
                "What is the box model in CSS?",
                "Explain the difference between var, let, and const in JavaScript.",
                "What is the DOM and how do you manipulate it?",
                "What are CSS selectors and how do they work?",
            ],
            (Domain::WebDevelopment, Difficulty::Intermediate) => &[
                "Explain the concept of closures in JavaScript.",
                "What is the difference between synchronous and asynchronous programming?",
                "How does CSS Grid differ from Flexbox?",
                "What are JavaScript promises and how do they work?",
                "Explain event bubbling and event capturing.",
                "What is the virtual DOM and why is it useful?",
                "How do you optimize website performance?",
                "What are RESTful APIs and how do you consume them?",
            ],
            (Domain::WebDevelopment, Difficulty::Advanced) => &[
                "Explain the JavaScript event loop and call stack.",
                "How would you implement server-side rendering?",
                "What are web workers and when would you use them?",
                "Explain the concept of progressive web apps.",
                "How do you handle state management in large applications?",
                "What are micro-frontends and their benefits?",
                "Explain browser caching strategies.",
                "How would you implement real-time features in a web app?",
            ],
            (Domain::DataStructures, Difficulty::Beginner) => &[
                "What is the difference between an array and a linked list?",
                "Explain what a stack is and give an example of its use.",
                "What is a queue and how does it differ from a stack?",
                "What is Big O notation and why is it important?",
                "Explain the concept of recursion with an example.",
                "What is a hash table and how does it work?",
                "What is the difference between linear and binary search?",
                "Explain what a tree data structure is.",
            ],
            (Domain::DataStructures, Difficulty::Intermediate) => &[
                "How would you detect a cycle in a linked list?",
                "Explain the difference between DFS and BFS.",
                "What is a binary search tree and its properties?",
                "How would you reverse a linked list?",
                "Explain dynamic programming with an example.",
                "What is the difference between a heap and a binary search tree?",
                "How would you find the middle element of a linked list?",
                "Explain the concept of graph algorithms.",
            ],
            (Domain::DataStructures, Difficulty::Advanced) => &[
                "How would you implement a LRU cache?",
                "Explain the concept of balanced trees like AVL or Red-Black trees.",
                "What are the different types of graph algorithms and their use cases?",
                "How would you design a data structure for autocomplete?",
                "Explain the concept of trie data structure.",
                "What is consistent hashing and where is it used?",
                "How would you implement a distributed hash table?",
                "Explain the concept of bloom filters.",
            ],
            (Domain::SystemDesign, Difficulty::Beginner) => &[
                "What is the difference between horizontal and vertical scaling?",
                "Explain what a load balancer is and why it's needed.",
                "What is a database and what are the different types?",
                "What is caching and why is it important?",
                "Explain the concept of microservices.",
                "What is the difference between SQL and NoSQL databases?",
                "What is an API and how does it work?",
                "Explain what CDN stands for and its purpose.",
            ],
            (Domain::SystemDesign, Difficulty::Intermediate) => &[
                "How would you design a URL shortener like bit.ly?",
                "Explain the CAP theorem and its implications.",
                "What is database sharding and when would you use it?",
                "How would you design a chat application?",
                "Explain the concept of eventual consistency.",
                "What are message queues and when would you use them?",
                "How would you design a notification system?",
                "Explain the concept of database replication.",
            ],
            (Domain::SystemDesign, Difficulty::Advanced) => &[
                "How would you design a system like Twitter?",
                "Explain the concept of distributed consensus algorithms.",
                "How would you design a global content delivery network?",
                "What are the challenges in designing a distributed database?",
                "How would you design a real-time analytics system?",
                "Explain the concept of event sourcing and CQRS.",
                "How would you design a system to handle millions of concurrent users?",
                "What are the trade-offs in designing a distributed system?",
            ],
            (Domain::Behavioral, Difficulty::Beginner) => &[
                "Tell me about yourself and your background.",
                "Why are you interested in this position?",
                "What are your greatest strengths?",
                "What is your biggest weakness?",
                "Where do you see yourself in 5 years?",
                "Why are you leaving your current job?",
                "What motivates you at work?",
                "How do you handle stress and pressure?",
            ],
            (Domain::Behavioral, Difficulty::Intermediate) => &[
                "Tell me about a time you faced a difficult challenge at work.",
                "Describe a situation where you had to work with a difficult team member.",
                "Give an example of when you had to learn something new quickly.",
                "Tell me about a time you made a mistake and how you handled it.",
                "Describe a situation where you had to meet a tight deadline.",
                "Give an example of when you had to persuade someone to see your point of view.",
                "Tell me about a time you received constructive criticism.",
                "Describe a situation where you had to adapt to change.",
            ],
            (Domain::Behavioral, Difficulty::Advanced) => &[
                "Tell me about a time you had to make a decision with incomplete information.",
                "Describe a situation where you had to lead a team through a crisis.",
                "Give an example of when you had to innovate or think outside the box.",
                "Tell me about a time you had to manage conflicting priorities.",
                "Describe a situation where you had to influence without authority.",
                "Give an example of when you had to take ownership of a failure.",
                "Tell me about a time you had to coach or mentor someone.",
                "Describe your approach to building and maintaining relationships.",
            ],
            (Domain::MachineLearning, Difficulty::Beginner) => &[
                "What is machine learning and how does it differ from traditional programming?",
                "Explain the difference between supervised and unsupervised learning.",
                "What is overfitting and how can you prevent it?",
                "What is the difference between classification and regression?",
                "Explain what a neural network is.",
                "What is cross-validation and why is it important?",
                "What is the bias-variance tradeoff?",
                "Explain the concept of feature engineering.",
            ],
            (Domain::MachineLearning, Difficulty::Intermediate) => &[
                "How would you evaluate a machine learning model?",
                "Explain the difference between bagging and boosting.",
                "What is regularization and when would you use it?",
                "How do you handle missing data in a dataset?",
                "Explain the concept of dimensionality reduction.",
                "What is the difference between precision and recall?",
                "How would you handle imbalanced datasets?",
                "Explain the concept of ensemble methods.",
            ],
            (Domain::MachineLearning, Difficulty::Advanced) => &[
                "How would you design a recommendation system?",
                "Explain the concept of deep learning and when to use it.",
                "What are the challenges in deploying ML models to production?",
                "How would you handle concept drift in machine learning?",
                "Explain the concept of transfer learning.",
                "What are GANs and how do they work?",
                "How would you design an A/B testing framework for ML models?",
                "Explain the concept of federated learning.",
            ],
            (Domain::MobileDevelopment, Difficulty::Beginner) => &[
                "What is the difference between native and hybrid mobile development?",
                "Explain the mobile app development lifecycle.",
                "What are the key considerations for mobile UI/UX design?",
                "How do you handle different screen sizes and orientations?",
                "What is the difference between iOS and Android development?",
                "Explain the concept of mobile app architecture.",
                "What are the common mobile app testing strategies?",
                "How do you optimize mobile app performance?",
            ],
            (Domain::MobileDevelopment, Difficulty::Intermediate) => &[
                "How do you handle offline functionality in mobile apps?",
                "Explain the concept of push notifications and how to implement them.",
                "What are the security considerations for mobile apps?",
                "How do you handle data synchronization in mobile apps?",
                "Explain the concept of mobile app state management.",
                "What are the best practices for mobile app deployment?",
                "How do you implement deep linking in mobile apps?",
                "Explain the concept of mobile app analytics.",
            ],
            (Domain::MobileDevelopment, Difficulty::Advanced) => &[
                "How would you design a mobile app architecture for scalability?",
                "Explain the concept of mobile app performance monitoring.",
                "What are the challenges in cross-platform mobile development?",
                "How would you implement real-time features in mobile apps?",
                "Explain the concept of mobile app security best practices.",
                "What are the considerations for mobile app accessibility?",
                "How would you handle mobile app updates and versioning?",
                "Explain the concept of mobile app CI/CD pipelines.",
            ],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = VivaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(VivaError::ConfigInvalid(format!(
                "unknown difficulty: {other}"
            ))),
        }
    }
}
