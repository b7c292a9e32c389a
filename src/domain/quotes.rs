//! Engineering quotes shown by `embedlink quote`

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub content: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote { content: "Talk is cheap. Show me the code.", author: "Linus Torvalds" },
    Quote { content: "Hardware is the body, software is the soul.", author: "Embedded Philosophy" },
    Quote { content: "Simplicity is prerequisite for reliability.", author: "Edsger W. Dijkstra" },
    Quote { content: "If it ain't broke, don't fix it.", author: "Engineering Proverb" },
    Quote { content: "First, solve the problem. Then, write the code.", author: "John Johnson" },
    Quote {
        content: "Debugging is twice as hard as writing the code in the first place. Therefore, if you write the code as cleverly as possible, you are, by definition, not smart enough to debug it.",
        author: "Brian Kernighan",
    },
    Quote {
        content: "Real programmers don't comment their code. If it was hard to write, it should be hard to understand.",
        author: "Unknown (Joke)",
    },
    Quote { content: "Premature optimization is the root of all evil.", author: "Donald Knuth" },
    Quote { content: "The only way to go fast, is to go well.", author: "Robert C. Martin" },
    Quote { content: "Stay hungry, stay foolish.", author: "Steve Jobs" },
];

/// Pick a quote at random
pub fn random_quote() -> &'static Quote {
    let n = Uuid::new_v4().as_u128();
    &QUOTES[(n % QUOTES.len() as u128) as usize]
}
