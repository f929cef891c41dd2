use crate::random::RandomSource;
use crate::types::{BreakUrgency, EncouragementMessage, MessageCategory};

const MOTIVATION_TEMPLATES: &[&str] = &[
    "Keep going, {name} - tricky questions are where the learning happens.",
    "{name}, every expert was once exactly where you are now.",
    "Don't sweat it, {name}. One more try and this will start to click.",
    "You're closer than you think, {name}. Stay with it.",
    "Mistakes are just data, {name}. Let's use them.",
    "{name}, progress isn't always a straight line. You're still moving.",
];

const BREAK_TEMPLATES: &[&str] = &[
    "{name}, a short break now will make the next round easier.",
    "Good moment to stretch, {name}. Five minutes away works wonders.",
    "You've been working hard, {name}. Step away for a bit and come back fresh.",
    "{name}, grab some water - this will all still be here in five minutes.",
    "A quick pause now, {name}, beats a long slump later.",
];

const BREAK_URGENT_TEMPLATES: &[&str] = &[
    "{name}, you've been at this a long time. Please take a real break now.",
    "Time to stop for a while, {name} - your focus will thank you.",
    "{name}, seriously: close this for fifteen minutes. It'll still be here.",
    "Long sessions stop paying off, {name}. Rest now, learn faster later.",
    "{name}, this is your sign to step away from the screen.",
];

const CELEBRATION_TEMPLATES: &[&str] = &[
    "Nailed it, {name}!",
    "That's the way, {name} - great answer!",
    "{name}, you're on a roll!",
    "Excellent work, {name}!",
    "Boom! Another one down, {name}.",
    "{name}, that was textbook. Keep it up!",
];

const GUIDANCE_TEMPLATES: &[&str] = &[
    "{name}, try breaking the problem into smaller steps.",
    "Stuck, {name}? Re-read the question and look for what it's really asking.",
    "{name}, a different angle might help - what do you already know here?",
    "Slow down a little, {name}. Accuracy first, speed later.",
    "{name}, the hints are there when you need them - but give it one solid try first.",
];

/// Picks one template from the category's pool, uniformly at random, and
/// substitutes the learner's display name. Break messages shift tone with
/// urgency.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageSelector;

impl MessageSelector {
    pub fn select(
        &self,
        category: MessageCategory,
        urgency: BreakUrgency,
        name: &str,
        random: &mut dyn RandomSource,
    ) -> EncouragementMessage {
        let pool = match category {
            MessageCategory::Motivation => MOTIVATION_TEMPLATES,
            MessageCategory::Break if urgency == BreakUrgency::Urgent => BREAK_URGENT_TEMPLATES,
            MessageCategory::Break => BREAK_TEMPLATES,
            MessageCategory::Celebration => CELEBRATION_TEMPLATES,
            MessageCategory::Guidance => GUIDANCE_TEMPLATES,
        };
        let template = pool[random.pick_index(pool.len())];
        EncouragementMessage {
            category,
            text: template.replace("{name}", name),
        }
    }
}
