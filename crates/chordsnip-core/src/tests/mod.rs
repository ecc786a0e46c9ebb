mod fields;
mod settings;
