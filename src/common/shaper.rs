// src/common/shaper.rs
//
// Agregados das listagens. Funções puras sobre as linhas já carregadas:
// nada aqui consulta o banco.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::models::{
    Label,
    activity::Rating,
    mission::{Mission, MissionListItem, MissionStatistics},
    payment::{PaymentListItem, PaymentStatistics},
    staff::{StaffProfile, StaffStatistics, StaffWithStats},
};

/// Conta as linhas por chave. Linhas sem chave ficam de fora.
pub fn histogram<T, K, F>(rows: &[T], key: F) -> BTreeMap<String, usize>
where
    K: ToString,
    F: Fn(&T) -> Option<K>,
{
    rows.iter().filter_map(|row| key(row)).fold(BTreeMap::new(), |mut acc, k| {
        *acc.entry(k.to_string()).or_insert(0) += 1;
        acc
    })
}

/// Média com duas casas; `None` sem avaliações.
pub fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let avg = sum as f64 / ratings.len() as f64;
    Some((avg * 100.0).round() / 100.0)
}

pub fn active_mission_count(missions: &[Mission], staff_id: Uuid) -> usize {
    missions
        .iter()
        .filter(|m| m.assigned_staff_id == Some(staff_id) && m.status.is_active())
        .count()
}

/// Junta a cada perfil sua média de avaliações e a carga de missões ativas.
pub fn shape_staff(
    profiles: Vec<StaffProfile>,
    ratings: &[Rating],
    missions: &[Mission],
) -> Vec<StaffWithStats> {
    let mut by_staff: HashMap<Uuid, Vec<i32>> = HashMap::new();
    for rating in ratings {
        by_staff.entry(rating.staff_id).or_default().push(rating.rating);
    }

    profiles
        .into_iter()
        .map(|profile| {
            let own = by_staff.get(&profile.id).map(Vec::as_slice).unwrap_or(&[]);
            StaffWithStats {
                average_rating: average_rating(own),
                total_ratings: own.len(),
                active_missions: active_mission_count(missions, profile.id),
                profile,
            }
        })
        .collect()
}

pub fn staff_statistics(staff: &[StaffWithStats]) -> StaffStatistics {
    StaffStatistics {
        status_counts: histogram(staff, |s| Some(s.profile.status.as_str())),
        department_counts: histogram(staff, |s| s.profile.department.clone()),
        total: staff.len(),
    }
}

pub fn mission_statistics(missions: &[MissionListItem]) -> MissionStatistics {
    MissionStatistics {
        status_counts: histogram(missions, |m| Some(m.mission.status.as_str())),
        priority_counts: histogram(missions, |m| Some(m.mission.priority.as_str())),
        total: missions.len(),
    }
}

pub fn payment_statistics(payments: &[PaymentListItem]) -> PaymentStatistics {
    PaymentStatistics {
        status_counts: histogram(payments, |p| Some(p.payment.payment_status.as_str())),
        total: payments.len(),
    }
}
