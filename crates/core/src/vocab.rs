//! Fixed vocabularies the generator draws from.

pub const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Emily", "David", "Sarah", "Robert", "Lisa", "William", "Jennifer",
    "James", "Mary", "Thomas", "Patricia", "Christopher", "Linda", "Daniel", "Barbara", "Matthew",
    "Elizabeth", "Anthony", "Jessica", "Mark", "Susan", "Donald", "Karen", "Steven", "Nancy",
    "Andrew", "Betty",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Thompson", "White", "Harris", "Sanchez", "Clark",
    "Ramirez", "Lewis", "Robinson", "Walker",
];

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Product Manager",
    "Data Analyst",
    "UX Designer",
    "DevOps Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "QA Engineer",
    "Marketing Manager",
    "Sales Representative",
    "Customer Success Manager",
    "HR Manager",
    "Finance Analyst",
    "Business Analyst",
];

pub const CATCH_PHRASES: &[&str] = &[
    "Think outside the box",
    "Synergy is key",
    "Let's circle back on that",
    "Low-hanging fruit",
    "Move the needle",
    "Paradigm shift",
    "Game changer",
    "Touch base",
    "Best practice",
    "Win-win situation",
    "Take it to the next level",
    "Deep dive",
    "Disrupt the market",
    "Innovation is everything",
    "Customer-centric approach",
];
