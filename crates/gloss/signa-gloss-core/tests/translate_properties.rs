use signa_gloss_core::{
    clean_text, stopwords, translate, translate_checked, Dictionary, Token, TokenKind,
    TranslateError,
};

fn fixture_dictionary() -> Dictionary {
    let json = signa_test_fixtures::dictionaries::json("lsp-basic").expect("dictionary fixture");
    Dictionary::from_json_str(&json).expect("fixture dictionary parses")
}

/// it should drop every stop word, whatever the list
#[test]
fn stop_word_only_text_yields_nothing() {
    let dict = fixture_dictionary();
    let all: Vec<&str> = stopwords::StopWordClass::ALL
        .iter()
        .flat_map(|c| c.words().iter().copied())
        .collect();
    let text = all.join("  ");
    assert!(translate(&text, &dict).is_empty());
    assert!(translate(&text.to_uppercase(), &dict).is_empty());
}

/// it should emit exactly one gloss per dictionary word, in position
#[test]
fn dictionary_words_map_to_single_glosses() {
    let dict = fixture_dictionary();
    let seq = translate("hola AMIGO gracias", &dict);
    assert_eq!(
        seq.as_strs(),
        vec![
            "HOLA", "LETTER_A", "LETTER_M", "LETTER_I", "LETTER_G", "LETTER_O", "GRACIAS"
        ]
    );
    assert_eq!(seq[0].kind(), TokenKind::Gloss);
    assert_eq!(seq[1].kind(), TokenKind::Spelling('A'));
}

/// it should spell "El perro come" letter by letter when nothing is in the dictionary
#[test]
fn el_perro_come_is_spelled() {
    let dict = Dictionary::from_entries([("AHORA", "/anim/ahora.glb")]);
    assert_eq!(clean_text("El perro come"), vec!["PERRO", "COME"]);
    let seq = translate("El perro come", &dict);
    assert_eq!(
        seq.as_strs(),
        vec![
            "LETTER_P", "LETTER_E", "LETTER_R", "LETTER_R", "LETTER_O", "LETTER_C", "LETTER_O",
            "LETTER_M", "LETTER_E"
        ]
    );
}

/// it should resolve "Ahora" to a single gloss and blank text to nothing
#[test]
fn ahora_and_blank_input() {
    let dict = Dictionary::from_entries([("AHORA", "/anim/ahora.glb")]);
    assert_eq!(translate("Ahora", &dict).as_strs(), vec!["AHORA"]);
    assert!(translate("   ", &dict).is_empty());
    assert_eq!(
        translate_checked("   ", &dict),
        Err(TranslateError::InputEmpty)
    );
}

/// it should be a pure function of (text, dictionary)
#[test]
fn translation_is_idempotent_and_never_blank() {
    let dict = fixture_dictionary();
    for text in [
        "Hola, ¿cómo estás?",
        "  la  niña  está en   la escuela ",
        "!!! ??? 123",
        "gracias gracias",
    ] {
        let a = translate(text, &dict);
        let b = translate(text, &dict);
        assert_eq!(a, b);
        assert!(a.iter().all(|t| !t.as_str().trim().is_empty()));
        assert!(a.iter().all(|t| Token::new(t.as_str()).is_ok()));
    }
}

/// it should keep punctuation attached to words, so "hola," is spelled
#[test]
fn punctuation_blocks_dictionary_match() {
    let dict = fixture_dictionary();
    let seq = translate("hola, ahora", &dict);
    assert_eq!(
        seq.as_strs(),
        vec!["LETTER_H", "LETTER_O", "LETTER_L", "LETTER_A", "AHORA"]
    );
}

/// it should spell accented vowels as their base letter and keep Ñ
#[test]
fn accented_words_spell_with_base_letters() {
    let dict = fixture_dictionary();
    assert_eq!(
        translate("café", &dict).as_strs(),
        vec!["LETTER_C", "LETTER_A", "LETTER_F", "LETTER_E"]
    );
    assert_eq!(
        translate("Ñandú", &dict).as_strs(),
        vec!["LETTER_Ñ", "LETTER_A", "LETTER_N", "LETTER_D", "LETTER_U"]
    );
}
