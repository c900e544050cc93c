//! Static 2024 GDP estimates by state.
//!
//! Values are nominal GDP in billions of US dollars. Names match the `name`
//! property of the us-atlas boundary document, which is the join key used by
//! the map.

/// (state name, GDP in billions USD)
pub static US_GDP_2024: &[(&str, f64)] = &[
    ("California", 4080.0),
    ("Texas", 2700.0),
    ("New York", 2300.0),
    ("Florida", 1700.0),
    ("Illinois", 1100.0),
    ("Pennsylvania", 1000.0),
    ("Ohio", 900.0),
    ("Washington", 880.0),
    ("Georgia", 820.0),
    ("New Jersey", 800.0),
    ("North Carolina", 790.0),
    ("Massachusetts", 750.0),
    ("Virginia", 730.0),
    ("Michigan", 680.0),
    ("Colorado", 540.0),
    ("Maryland", 530.0),
    ("Tennessee", 530.0),
    ("Arizona", 520.0),
    ("Indiana", 500.0),
    ("Minnesota", 480.0),
    ("Wisconsin", 420.0),
    ("Missouri", 420.0),
    ("Connecticut", 340.0),
    ("South Carolina", 330.0),
    ("Oregon", 320.0),
    ("Louisiana", 310.0),
    ("Alabama", 310.0),
    ("Utah", 270.0),
    ("Kentucky", 270.0),
    ("Nevada", 250.0),
    ("Oklahoma", 250.0),
    ("Iowa", 240.0),
    ("Kansas", 220.0),
    ("District of Columbia", 180.0),
    ("Nebraska", 180.0),
    ("Arkansas", 170.0),
    ("Mississippi", 150.0),
    ("New Mexico", 130.0),
    ("Idaho", 120.0),
    ("New Hampshire", 110.0),
    ("Hawaii", 110.0),
    ("West Virginia", 100.0),
    ("Delaware", 95.0),
    ("Maine", 90.0),
    ("Rhode Island", 75.0),
    ("North Dakota", 70.0),
    ("South Dakota", 70.0),
    ("Montana", 70.0),
    ("Alaska", 65.0),
    ("Wyoming", 50.0),
    ("Vermont", 42.0),
];
