pub mod mountstats;
