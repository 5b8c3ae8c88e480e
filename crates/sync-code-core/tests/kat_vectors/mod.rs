mod date_word;
mod passphrase;
