// ============================================================================
// COPY FEEDBACK - Tabla de tareas programadas "Copiado" por email
// ============================================================================
// Cada entrada expira de forma independiente. Los tiempos se pasan en ms
// (js_sys::Date::now() en el navegador, reloj virtual en los tests).
// ============================================================================

use std::collections::HashMap;

pub const COPY_FEEDBACK_MS: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FeedbackEntry {
    expires_at: f64,
    ticket: u64,
}

#[derive(Debug, Default)]
pub struct CopyFeedback {
    entries: HashMap<String, FeedbackEntry>,
    next_ticket: u64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marca el email como copiado; devuelve el ticket de su temporizador.
    /// Copiar de nuevo el mismo email reinicia su ventana.
    pub fn mark_copied(&mut self, email: &str, now_ms: f64) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.entries.insert(
            email.to_string(),
            FeedbackEntry {
                expires_at: now_ms + COPY_FEEDBACK_MS,
                ticket,
            },
        );
        ticket
    }

    pub fn is_copied(&self, email: &str, now_ms: f64) -> bool {
        self.entries
            .get(email)
            .is_some_and(|entry| now_ms < entry.expires_at)
    }

    /// Callback del temporizador: solo borra si el ticket sigue vigente
    pub fn expire(&mut self, email: &str, ticket: u64) -> bool {
        match self.entries.get(email) {
            Some(entry) if entry.ticket == ticket => {
                self.entries.remove(email);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self, email: &str) -> bool {
        self.entries.remove(email).is_some()
    }

    /// Borra las entradas vencidas y devuelve sus emails
    pub fn sweep(&mut self, now_ms: f64) -> Vec<String> {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| now_ms >= entry.expires_at)
            .map(|(email, _)| email.clone())
            .collect();
        for email in &expired {
            self.entries.remove(email);
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
